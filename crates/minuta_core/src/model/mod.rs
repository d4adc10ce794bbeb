//! Domain model for accounts, templates and generated minutes.
//!
//! # Responsibility
//! - Define the canonical data structures used by core business logic.
//! - Own identifier/key derivation rules shared by registry and pipeline.
//!
//! # Invariants
//! - Emails are normalized to lowercase at every model boundary.
//! - Template ids and minutes section keys are deterministic slugs of
//!   their display names.

pub mod identity;
pub mod minutes;
pub mod template;
