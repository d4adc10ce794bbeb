//! Minutes generation pipeline and history store.
//!
//! # Responsibility
//! - Turn a transcript plus a template into a structured minutes
//!   document with one entry per declared section.
//! - Maintain the most-recent-first history for the active namespace.
//!
//! # Invariants
//! - The pipeline owns only the shape contract; section content comes
//!   from the generation collaborator.
//! - Every history mutation flushes before returning.
//! - A generation started before a namespace switch can never overwrite
//!   state loaded after it (epoch ticket check).

use crate::generate::ContentGenerator;
use crate::model::minutes::{HistoryRecord, MinutesDocument, SectionContent};
use crate::model::template::{derive_section_key, Template};
use crate::repo::blob_repo::{BlobRepository, NamespaceKey, ResourceKind};
use crate::repo::{RepoError, RepoResult};
use log::{debug, warn};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::time::{SystemTime, UNIX_EPOCH};

/// Pipeline error taxonomy.
#[derive(Debug)]
pub enum MinutesServiceError {
    Repo(RepoError),
    /// Generation completed against a namespace that changed mid-flight.
    StaleGeneration { ticket_epoch: u64, current_epoch: u64 },
}

impl Display for MinutesServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::StaleGeneration {
                ticket_epoch,
                current_epoch,
            } => write!(
                f,
                "stale generation: ticket epoch {ticket_epoch} behind namespace epoch {current_epoch}"
            ),
        }
    }
}

impl Error for MinutesServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::StaleGeneration { .. } => None,
        }
    }
}

impl From<RepoError> for MinutesServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Token tying an in-flight generation to the namespace state it started
/// from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GenerationTicket {
    epoch: u64,
}

/// Generation pipeline plus history store for one namespace.
pub struct MinutesService<B: BlobRepository, G: ContentGenerator> {
    repo: B,
    generator: G,
    namespace: NamespaceKey,
    history: Vec<HistoryRecord>,
    epoch: u64,
}

impl<B: BlobRepository, G: ContentGenerator> MinutesService<B, G> {
    /// Creates a pipeline and loads the given namespace's history.
    pub fn new(repo: B, generator: G, namespace: NamespaceKey) -> RepoResult<Self> {
        let mut service = Self {
            repo,
            generator,
            namespace: NamespaceKey::guest(),
            history: Vec::new(),
            epoch: 0,
        };
        service.load_namespace(namespace)?;
        Ok(service)
    }

    /// Replaces the history from the namespace's persisted blob and bumps
    /// the generation epoch, invalidating outstanding tickets.
    pub fn load_namespace(&mut self, namespace: NamespaceKey) -> RepoResult<()> {
        let loaded = self
            .repo
            .load(&namespace, ResourceKind::MinutesHistory)?
            .and_then(|payload| decode_history(&namespace, &payload));
        self.history = loaded.unwrap_or_default();
        self.namespace = namespace;
        self.epoch += 1;
        Ok(())
    }

    /// Issues a ticket for a split-phase generation (async collaborator
    /// call driven by the embedder).
    pub fn begin_generation(&self) -> GenerationTicket {
        GenerationTicket { epoch: self.epoch }
    }

    /// Synchronous generation path: calls the collaborator, assembles the
    /// document and records it in history.
    pub fn generate(
        &mut self,
        transcript: &str,
        template: &Template,
    ) -> Result<MinutesDocument, MinutesServiceError> {
        let ticket = self.begin_generation();
        let content = self
            .generator
            .generate_content(transcript, &template.sections);
        let document = assemble_document(&template.sections, content);
        self.complete_generation(ticket, template, document)
    }

    /// Records a finished generation: prepends a history record and
    /// flushes.
    ///
    /// # Errors
    /// - `MinutesServiceError::StaleGeneration` when the namespace was
    ///   switched after the ticket was issued; newer state is left
    ///   untouched.
    pub fn complete_generation(
        &mut self,
        ticket: GenerationTicket,
        template: &Template,
        document: MinutesDocument,
    ) -> Result<MinutesDocument, MinutesServiceError> {
        if ticket.epoch != self.epoch {
            warn!(
                "event=generation_discard module=minutes status=stale namespace={} ticket_epoch={} current_epoch={}",
                self.namespace, ticket.epoch, self.epoch
            );
            return Err(MinutesServiceError::StaleGeneration {
                ticket_epoch: ticket.epoch,
                current_epoch: self.epoch,
            });
        }

        let record = HistoryRecord {
            ts_ms: now_epoch_ms(),
            template_name: template.name.clone(),
            title: document.derive_title(),
            minutes: document.clone(),
        };
        self.history.insert(0, record);
        self.flush()?;
        Ok(document)
    }

    /// History records, most recent first.
    pub fn history(&self) -> &[HistoryRecord] {
        &self.history
    }

    /// Returns the document stored at `index`, if in range.
    pub fn view(&self, index: usize) -> Option<&MinutesDocument> {
        self.history.get(index).map(|record| &record.minutes)
    }

    /// Removes the record at `index`. Out-of-range is a no-op, matching
    /// the permissive UI semantics.
    pub fn delete(&mut self, index: usize) -> RepoResult<()> {
        if index >= self.history.len() {
            debug!(
                "event=history_delete module=minutes status=noop namespace={} index={index}",
                self.namespace
            );
            return Ok(());
        }
        self.history.remove(index);
        self.flush()
    }

    /// Removes all history records for the active namespace.
    pub fn clear(&mut self) -> RepoResult<()> {
        self.history.clear();
        self.flush()
    }

    fn flush(&self) -> RepoResult<()> {
        let payload = serde_json::to_string(&self.history)
            .map_err(|err| RepoError::Encode(err.to_string()))?;
        self.repo
            .save(&self.namespace, ResourceKind::MinutesHistory, &payload)
    }
}

/// Builds a document with exactly one entry per declared section, in
/// order. Sections the backend did not cover map to empty text.
pub fn assemble_document(
    sections: &[String],
    mut content: BTreeMap<String, SectionContent>,
) -> MinutesDocument {
    let mut document = MinutesDocument::new();
    for section in sections {
        let value = content
            .remove(section.as_str())
            .unwrap_or_else(SectionContent::empty);
        document.push(derive_section_key(section), value);
    }
    document
}

fn decode_history(namespace: &NamespaceKey, payload: &str) -> Option<Vec<HistoryRecord>> {
    match serde_json::from_str(payload) {
        Ok(history) => Some(history),
        Err(err) => {
            warn!(
                "event=state_decode module=minutes status=fallback namespace={namespace} error={err}"
            );
            None
        }
    }
}

fn now_epoch_ms() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|elapsed| elapsed.as_millis() as i64)
        .unwrap_or_default()
}
