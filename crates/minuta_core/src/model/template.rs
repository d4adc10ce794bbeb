//! Minutes template model.
//!
//! # Responsibility
//! - Define the template shape used by registry and generation pipeline.
//! - Derive deterministic slugs for template ids and section keys.
//! - Provide the built-in seed templates for fresh namespaces.
//!
//! # Invariants
//! - `id` is unique within a namespace and slug-form.
//! - `sections` is non-empty and order-significant; declaration order
//!   defines minutes output order.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

static NON_ALNUM_RUN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[^a-z0-9]+").expect("valid slug regex"));

/// Named, ordered list of section labels defining the shape of a minutes
/// document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    /// Slug-form identifier, unique within a namespace.
    pub id: String,
    /// Display name the id is derived from.
    pub name: String,
    /// Short human-readable summary.
    #[serde(default)]
    pub description: String,
    /// Ordered section labels; defines output order.
    pub sections: Vec<String>,
    /// Optional generation hints keyed by section name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prompts: Option<BTreeMap<String, String>>,
}

/// Validation failure for template fields.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateValidationError {
    /// The named field is empty or contains only blank values.
    EmptyField(&'static str),
}

impl Display for TemplateValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyField(field) => write!(f, "template field cannot be empty: {field}"),
        }
    }
}

impl Error for TemplateValidationError {}

impl Template {
    /// Creates a template with an id derived from `name`.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        sections: Vec<String>,
    ) -> Self {
        let name = name.into();
        Self {
            id: derive_template_id(&name),
            name,
            description: description.into(),
            sections,
            prompts: None,
        }
    }

    /// Creates a template with a caller-provided id.
    ///
    /// Used by built-in seeds and by imports that carry their own id.
    pub fn with_id(
        id: impl Into<String>,
        name: impl Into<String>,
        description: impl Into<String>,
        sections: Vec<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: description.into(),
            sections,
            prompts: None,
        }
    }

    /// Checks structural invariants before a template may be persisted.
    pub fn validate(&self) -> Result<(), TemplateValidationError> {
        if self.id.trim().is_empty() {
            return Err(TemplateValidationError::EmptyField("id"));
        }
        if self.name.trim().is_empty() {
            return Err(TemplateValidationError::EmptyField("name"));
        }
        if self.sections.is_empty() {
            return Err(TemplateValidationError::EmptyField("sections"));
        }
        if self.sections.iter().any(|section| section.trim().is_empty()) {
            return Err(TemplateValidationError::EmptyField("sections"));
        }
        Ok(())
    }
}

/// Derives a template id slug from a display name.
///
/// Lowercases the name and collapses every non-alphanumeric run to a
/// single `-`, so `"Board Meeting"` and `"board   meeting!!"` produce the
/// same id.
pub fn derive_template_id(name: &str) -> String {
    slugify(name, '-')
}

/// Derives a minutes section key from a section label.
///
/// Same normalization as template ids with `_` as separator, so
/// `"Action Items"` becomes `action_items` and `"Date/Time"` becomes
/// `date_time`.
pub fn derive_section_key(name: &str) -> String {
    slugify(name, '_')
}

fn slugify(value: &str, separator: char) -> String {
    let lowered = value.to_lowercase();
    let collapsed = NON_ALNUM_RUN_RE.replace_all(&lowered, separator.to_string().as_str());
    collapsed.trim_matches(separator).to_string()
}

/// Built-in templates seeding any namespace that has never saved its own.
pub fn builtin_templates() -> Vec<Template> {
    vec![
        Template::with_id(
            "default",
            "Default Minutes",
            "Concise minutes with actions and decisions.",
            to_sections(&[
                "Title",
                "Date/Time",
                "Attendees",
                "Agenda",
                "Decisions",
                "Action Items",
                "Risks",
                "Next Meeting",
            ]),
        ),
        Template::with_id(
            "board",
            "Board Meeting",
            "Formal structure for board sessions.",
            to_sections(&[
                "Title",
                "Date/Time",
                "Attendees",
                "Agenda",
                "Resolutions",
                "Motions",
                "Votes",
                "Action Items",
            ]),
        ),
        Template::with_id(
            "sprint",
            "Sprint Review",
            "Engineering review and planning notes.",
            to_sections(&[
                "Sprint",
                "Participants",
                "Highlights",
                "Metrics",
                "Demos",
                "Decisions",
                "Backlog",
                "Action Items",
            ]),
        ),
    ]
}

fn to_sections(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|label| label.to_string()).collect()
}
