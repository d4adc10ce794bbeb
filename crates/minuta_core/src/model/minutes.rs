//! Generated minutes model.
//!
//! # Responsibility
//! - Define the structured minutes document and its history record shape.
//!
//! # Invariants
//! - A document holds exactly one entry per section of the template that
//!   produced it, in declared order.
//! - Entry keys are normalized section keys (see
//!   [`crate::model::template::derive_section_key`]).

use serde::{Deserialize, Serialize};

/// Fallback title for documents without a usable `title` entry.
pub const UNTITLED_MINUTES: &str = "Untitled Minutes";

/// Content of one minutes section: a single paragraph or an ordered list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SectionContent {
    Text(String),
    Items(Vec<String>),
}

impl SectionContent {
    /// Empty scalar content, used when a backend supplies nothing for a
    /// declared section.
    pub fn empty() -> Self {
        Self::Text(String::new())
    }

    /// Returns the scalar text, if this is scalar content.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Self::Text(text) => Some(text.as_str()),
            Self::Items(_) => None,
        }
    }
}

/// One keyed entry of a minutes document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MinutesEntry {
    pub key: String,
    pub content: SectionContent,
}

/// Structured minutes output: ordered entries keyed by normalized section
/// key.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MinutesDocument {
    entries: Vec<MinutesEntry>,
}

impl MinutesDocument {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one entry, preserving declaration order.
    pub fn push(&mut self, key: impl Into<String>, content: SectionContent) {
        self.entries.push(MinutesEntry {
            key: key.into(),
            content,
        });
    }

    /// Returns the content stored under `key`, if present.
    pub fn get(&self, key: &str) -> Option<&SectionContent> {
        self.entries
            .iter()
            .find(|entry| entry.key == key)
            .map(|entry| &entry.content)
    }

    pub fn entries(&self) -> &[MinutesEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the `title` entry when it is non-empty scalar text, else
    /// the fixed fallback label.
    pub fn derive_title(&self) -> String {
        match self.get("title").and_then(SectionContent::as_text) {
            Some(text) if !text.trim().is_empty() => text.trim().to_string(),
            _ => UNTITLED_MINUTES.to_string(),
        }
    }
}

/// Saved, timestamped minutes document plus its originating template name
/// and derived title. History is ordered most-recent-first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryRecord {
    /// Generation instant in epoch milliseconds.
    pub ts_ms: i64,
    pub template_name: String,
    pub title: String,
    pub minutes: MinutesDocument,
}
