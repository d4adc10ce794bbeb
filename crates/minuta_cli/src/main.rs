//! CLI smoke entry point.
//!
//! # Responsibility
//! - Provide a minimal executable to verify `minuta_core` wiring.
//! - Run one template-to-minutes flow against an in-memory database and
//!   print the rendered result.

use minuta_core::db::open_db_in_memory;
use minuta_core::{
    render_markdown, MinutesService, NamespaceKey, OutlineGenerator, SqliteBlobRepository,
    TemplateService,
};

const SAMPLE_TRANSCRIPT: &str = "Project sync for week twelve. \
We agreed on one decision: push the release by a week. \
Action items: Alice finalizes the timeline on Friday. \
One risk is vendor delay on the API.";

fn main() {
    if let Err(err) = run() {
        eprintln!("minuta_cli error: {err}");
        std::process::exit(1);
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    let conn = open_db_in_memory()?;
    let namespace = NamespaceKey::guest();

    let templates = TemplateService::new(SqliteBlobRepository::try_new(&conn)?, namespace.clone())?;
    let template = templates
        .select("default")
        .ok_or("default template missing")?
        .clone();

    let mut minutes = MinutesService::new(
        SqliteBlobRepository::try_new(&conn)?,
        OutlineGenerator,
        namespace,
    )?;
    let document = minutes.generate(SAMPLE_TRANSCRIPT, &template)?;

    println!("minuta_core version={}", minuta_core::core_version());
    print!("{}", render_markdown(&document));
    Ok(())
}
