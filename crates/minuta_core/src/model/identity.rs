//! Account identity model.
//!
//! # Invariants
//! - `email` is always stored lowercase. One normalization is applied
//!   uniformly for credential lookup, session storage and namespace
//!   derivation.

use serde::{Deserialize, Serialize};

/// Signed-in account identity. Carries no secret material; passwords live
/// only in the credential store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub email: String,
}

impl Identity {
    /// Creates an identity with a normalized email.
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: normalize_email(&email.into()),
        }
    }
}

/// Canonical email form used everywhere an email acts as a key.
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}
