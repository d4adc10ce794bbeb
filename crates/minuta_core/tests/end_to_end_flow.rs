//! Full flow: transcribe (fixture) -> generate -> history -> export.

use minuta_core::db::open_db_in_memory;
use minuta_core::{
    render_markdown, FixtureTranscriber, MinutesService, NamespaceKey, OutlineGenerator,
    SqliteBlobRepository, TemplateService, Transcriber,
};
use std::path::Path;

#[test]
fn transcript_becomes_structured_minutes_and_markdown() {
    let conn = open_db_in_memory().unwrap();
    let namespace = NamespaceKey::guest();

    let templates =
        TemplateService::new(SqliteBlobRepository::try_new(&conn).unwrap(), namespace.clone())
            .unwrap();
    let template = templates.select("default").unwrap().clone();

    let transcriber = FixtureTranscriber::new(
        "Project sync for week twelve. \
         The decision was to push the release by one week. \
         One risk is vendor delay on the API.",
    );
    let transcript = transcriber.transcribe(Path::new("meeting.wav"));

    let mut minutes = MinutesService::new(
        SqliteBlobRepository::try_new(&conn).unwrap(),
        OutlineGenerator,
        namespace,
    )
    .unwrap();
    let document = minutes.generate(&transcript, &template).unwrap();

    // One entry per declared section, in order.
    assert_eq!(document.len(), template.sections.len());
    assert_eq!(document.entries()[0].key, "title");
    assert_eq!(document.derive_title(), "Project sync for week twelve");

    // Generation landed in history and was flushed.
    assert_eq!(minutes.history().len(), 1);
    assert_eq!(minutes.history()[0].template_name, "Default Minutes");

    let markdown = render_markdown(&document);
    assert!(markdown.starts_with("# Meeting Minutes\n"));
    assert!(markdown.contains("## Title"));
    assert!(markdown.contains("## Risks"));
    assert!(markdown.contains("vendor delay"));
}
