//! Markdown rendering for generated minutes.

use crate::model::minutes::{MinutesDocument, SectionContent};

/// Renders a minutes document as Markdown: one heading per section,
/// scalar content as a paragraph, sequence content as a bullet list.
pub fn render_markdown(document: &MinutesDocument) -> String {
    let mut out = String::from("# Meeting Minutes\n");
    for entry in document.entries() {
        out.push_str("\n## ");
        out.push_str(&heading_from_key(&entry.key));
        out.push_str("\n\n");
        match &entry.content {
            SectionContent::Text(text) => {
                out.push_str(text);
                out.push('\n');
            }
            SectionContent::Items(items) => {
                for item in items {
                    out.push_str("- ");
                    out.push_str(item);
                    out.push('\n');
                }
            }
        }
    }
    out
}

/// Turns a section key back into a display heading: `action_items`
/// becomes `Action Items`.
pub fn heading_from_key(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::{heading_from_key, render_markdown};
    use crate::model::minutes::{MinutesDocument, SectionContent};

    #[test]
    fn heading_restores_title_case() {
        assert_eq!(heading_from_key("action_items"), "Action Items");
        assert_eq!(heading_from_key("title"), "Title");
    }

    #[test]
    fn renders_paragraphs_and_bullet_lists() {
        let mut document = MinutesDocument::new();
        document.push("title", SectionContent::Text("Weekly Sync".to_string()));
        document.push(
            "action_items",
            SectionContent::Items(vec!["Alice: timeline".to_string(), "Ben: budget".to_string()]),
        );

        let markdown = render_markdown(&document);
        assert!(markdown.contains("## Title\n\nWeekly Sync\n"));
        assert!(markdown.contains("## Action Items\n\n- Alice: timeline\n- Ben: budget\n"));
    }
}
