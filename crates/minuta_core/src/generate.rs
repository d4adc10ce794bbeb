//! External collaborator contracts for transcription and content
//! generation, plus a deterministic offline generator.

use crate::model::minutes::SectionContent;
use crate::model::template::derive_section_key;
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeMap;
use std::path::Path;

static SENTENCE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^.!?\n]+").expect("valid sentence regex"));

const TITLE_MAX_CHARS: usize = 80;

/// Transcription collaborator: audio file to plain text. Transport and
/// model errors are the collaborator's concern, not the core's.
pub trait Transcriber {
    fn transcribe(&self, audio_path: &Path) -> String;
}

/// Generation collaborator: transcript plus declared section names to
/// content keyed by section name. Sections may be omitted; the pipeline
/// fills the gaps.
pub trait ContentGenerator {
    fn generate_content(
        &self,
        transcript: &str,
        section_names: &[String],
    ) -> BTreeMap<String, SectionContent>;
}

/// Transcriber stand-in returning a fixed transcript, used by the CLI and
/// tests in place of a speech-to-text backend.
#[derive(Debug, Clone)]
pub struct FixtureTranscriber {
    text: String,
}

impl FixtureTranscriber {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

impl Transcriber for FixtureTranscriber {
    fn transcribe(&self, _audio_path: &Path) -> String {
        self.text.clone()
    }
}

/// Deterministic offline generator.
///
/// Splits the transcript into sentences and assigns each section the
/// sentences mentioning a word of its name. The `title` section gets the
/// first sentence. Sections with no match are omitted so the pipeline's
/// empty-content default applies.
#[derive(Debug, Clone, Copy, Default)]
pub struct OutlineGenerator;

impl ContentGenerator for OutlineGenerator {
    fn generate_content(
        &self,
        transcript: &str,
        section_names: &[String],
    ) -> BTreeMap<String, SectionContent> {
        let sentences = split_sentences(transcript);
        let mut content = BTreeMap::new();

        for name in section_names {
            if derive_section_key(name) == "title" {
                if let Some(first) = sentences.first() {
                    content.insert(name.clone(), SectionContent::Text(truncate(first)));
                }
                continue;
            }

            let hits = matching_sentences(&sentences, name);
            match hits.len() {
                0 => {}
                1 => {
                    content.insert(name.clone(), SectionContent::Text(hits[0].clone()));
                }
                _ => {
                    content.insert(name.clone(), SectionContent::Items(hits));
                }
            }
        }

        content
    }
}

fn split_sentences(transcript: &str) -> Vec<String> {
    SENTENCE_RE
        .find_iter(transcript)
        .map(|m| m.as_str().trim().to_string())
        .filter(|sentence| !sentence.is_empty())
        .collect()
}

fn matching_sentences(sentences: &[String], section_name: &str) -> Vec<String> {
    // Plural section labels ("Risks", "Decisions") should match singular
    // mentions, so trailing `s` is stripped from keywords.
    let keywords: Vec<String> = section_name
        .to_lowercase()
        .split(|c: char| !c.is_ascii_alphanumeric())
        .filter(|word| word.len() >= 4)
        .map(|word| word.trim_end_matches('s').to_string())
        .collect();
    if keywords.is_empty() {
        return Vec::new();
    }

    sentences
        .iter()
        .filter(|sentence| {
            let lowered = sentence.to_lowercase();
            keywords.iter().any(|keyword| lowered.contains(keyword))
        })
        .cloned()
        .collect()
}

fn truncate(sentence: &str) -> String {
    sentence.chars().take(TITLE_MAX_CHARS).collect()
}

#[cfg(test)]
mod tests {
    use super::{ContentGenerator, OutlineGenerator};
    use crate::model::minutes::SectionContent;

    fn sections(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|label| label.to_string()).collect()
    }

    #[test]
    fn title_takes_first_sentence() {
        let generator = OutlineGenerator;
        let content = generator.generate_content(
            "Weekly sync kickoff. We discussed risks.",
            &sections(&["Title", "Risks"]),
        );
        assert_eq!(
            content.get("Title"),
            Some(&SectionContent::Text("Weekly sync kickoff".to_string()))
        );
    }

    #[test]
    fn sections_collect_matching_sentences_scalar_or_list() {
        let generator = OutlineGenerator;
        let transcript = "Opening remarks. One risk is vendor delay. Another risk is QA bandwidth. We made a decision to cut scope.";
        let content =
            generator.generate_content(transcript, &sections(&["Risks", "Decisions", "Votes"]));

        assert!(matches!(
            content.get("Risks"),
            Some(SectionContent::Items(items)) if items.len() == 2
        ));
        assert!(matches!(content.get("Decisions"), Some(SectionContent::Text(_))));
        assert!(content.get("Votes").is_none());
    }
}
