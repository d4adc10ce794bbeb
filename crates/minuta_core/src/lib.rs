//! Core domain logic for Minuta, a meeting-minutes workspace.
//! This crate is the single source of truth for namespace isolation,
//! session lifecycle and the template-to-minutes generation contract.

pub mod db;
pub mod export;
pub mod generate;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;

pub use export::render_markdown;
pub use generate::{ContentGenerator, FixtureTranscriber, OutlineGenerator, Transcriber};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::identity::{normalize_email, Identity};
pub use model::minutes::{
    HistoryRecord, MinutesDocument, MinutesEntry, SectionContent, UNTITLED_MINUTES,
};
pub use model::template::{
    builtin_templates, derive_section_key, derive_template_id, Template, TemplateValidationError,
};
pub use repo::blob_repo::{
    BlobRepository, NamespaceKey, ResourceKind, SqliteBlobRepository, GUEST_NAMESPACE,
};
pub use repo::credential_repo::{CredentialRecord, CredentialRepository, SqliteCredentialRepository};
pub use repo::session_repo::{MemorySessionStore, SessionStore, SqliteSessionStore};
pub use repo::{RepoError, RepoResult};
pub use service::credential_service::{AuthError, CredentialService};
pub use service::minutes_service::{
    assemble_document, GenerationTicket, MinutesService, MinutesServiceError,
};
pub use service::session_service::{Session, SessionManager};
pub use service::template_service::{TemplateService, TemplateServiceError};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
