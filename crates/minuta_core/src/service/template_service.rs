//! Template registry.
//!
//! # Responsibility
//! - Hold the in-memory working set of templates for one namespace.
//! - Seed built-ins for namespaces that have never saved any.
//! - Persist the full working set after every mutation.
//!
//! # Invariants
//! - Id collisions on upsert overwrite (last write wins, single writer).
//! - A corrupt persisted blob falls back to built-ins with a warning; it
//!   is never propagated as an error.
//! - Imports are rejected whole; no partial template is ever kept.

use crate::model::template::{
    builtin_templates, derive_template_id, Template, TemplateValidationError,
};
use crate::repo::blob_repo::{BlobRepository, NamespaceKey, ResourceKind};
use crate::repo::{RepoError, RepoResult};
use log::{info, warn};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Template registry error taxonomy.
#[derive(Debug)]
pub enum TemplateServiceError {
    /// Import document could not be parsed or fails template validation.
    MalformedTemplate(String),
    /// A user-edited template fails validation; blocks only that save.
    Validation(TemplateValidationError),
    Repo(RepoError),
}

impl Display for TemplateServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedTemplate(message) => write!(f, "malformed template: {message}"),
            Self::Validation(err) => write!(f, "{err}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for TemplateServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MalformedTemplate(_) => None,
            Self::Validation(err) => Some(err),
            Self::Repo(err) => Some(err),
        }
    }
}

impl From<TemplateValidationError> for TemplateServiceError {
    fn from(value: TemplateValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<RepoError> for TemplateServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// External template document shape accepted by [`TemplateService::import_raw`].
#[derive(Debug, Deserialize)]
struct ImportDoc {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
    sections: Vec<String>,
    #[serde(default)]
    prompts: Option<BTreeMap<String, String>>,
}

/// Per-namespace template working set backed by the persistence layer.
pub struct TemplateService<B: BlobRepository> {
    repo: B,
    namespace: NamespaceKey,
    templates: Vec<Template>,
}

impl<B: BlobRepository> TemplateService<B> {
    /// Creates a registry and loads the given namespace.
    pub fn new(repo: B, namespace: NamespaceKey) -> RepoResult<Self> {
        let mut service = Self {
            repo,
            namespace: NamespaceKey::guest(),
            templates: Vec::new(),
        };
        service.load_namespace(namespace)?;
        Ok(service)
    }

    /// Replaces the working set from the namespace's persisted blob.
    ///
    /// Seeds built-ins when the namespace has never saved templates or
    /// when the persisted blob cannot be decoded.
    pub fn load_namespace(&mut self, namespace: NamespaceKey) -> RepoResult<()> {
        let loaded = self
            .repo
            .load(&namespace, ResourceKind::Templates)?
            .and_then(|payload| decode_templates(&namespace, &payload));
        self.templates = loaded.unwrap_or_else(builtin_templates);
        self.namespace = namespace;
        Ok(())
    }

    /// Returns the working set in persisted order (built-ins first on a
    /// fresh namespace).
    pub fn list(&self) -> &[Template] {
        &self.templates
    }

    /// Looks up one template by id.
    pub fn select(&self, id: &str) -> Option<&Template> {
        let id = id.trim();
        self.templates.iter().find(|template| template.id == id)
    }

    /// Replaces the template with the same id, or appends. Flushes the
    /// working set before returning.
    pub fn upsert(&mut self, template: Template) -> Result<(), TemplateServiceError> {
        template.validate()?;

        match self
            .templates
            .iter()
            .position(|existing| existing.id == template.id)
        {
            Some(index) => self.templates[index] = template,
            None => self.templates.push(template),
        }
        self.flush()?;
        Ok(())
    }

    /// Parses an external JSON document into a template and stores it.
    ///
    /// A missing id is derived from the name; a missing name falls back
    /// to a fixed label. The whole document is rejected when parsing or
    /// validation fails.
    pub fn import_raw(&mut self, payload: &str) -> Result<Template, TemplateServiceError> {
        let doc: ImportDoc = serde_json::from_str(payload)
            .map_err(|err| TemplateServiceError::MalformedTemplate(err.to_string()))?;

        let name = doc
            .name
            .filter(|name| !name.trim().is_empty())
            .unwrap_or_else(|| "Custom Template".to_string());
        let id = doc
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(|| derive_template_id(&name));
        let template = Template {
            id,
            name,
            description: doc.description.unwrap_or_default(),
            sections: doc.sections,
            prompts: doc.prompts,
        };
        template
            .validate()
            .map_err(|err| TemplateServiceError::MalformedTemplate(err.to_string()))?;

        info!(
            "event=template_import module=templates status=ok namespace={} id={}",
            self.namespace, template.id
        );
        self.upsert(template.clone())?;
        Ok(template)
    }

    fn flush(&self) -> RepoResult<()> {
        let payload = serde_json::to_string(&self.templates)
            .map_err(|err| RepoError::Encode(err.to_string()))?;
        self.repo
            .save(&self.namespace, ResourceKind::Templates, &payload)
    }
}

fn decode_templates(namespace: &NamespaceKey, payload: &str) -> Option<Vec<Template>> {
    match serde_json::from_str(payload) {
        Ok(templates) => Some(templates),
        Err(err) => {
            warn!(
                "event=state_decode module=templates status=fallback namespace={namespace} error={err}"
            );
            None
        }
    }
}
