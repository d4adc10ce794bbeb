//! Credential verification and registration.
//!
//! # Responsibility
//! - Register first-time accounts and verify returning ones in a single
//!   call, matching the sign-in form's behavior.
//! - Own password hashing; repositories only see opaque PHC strings.
//!
//! # Invariants
//! - Passwords are hashed with argon2 and a fresh per-record salt.
//! - Plaintext passwords never reach the repository layer.

use crate::model::identity::normalize_email;
use crate::repo::credential_repo::{CredentialRecord, CredentialRepository};
use crate::repo::RepoError;
use argon2::password_hash::{PasswordHasher, PasswordVerifier, SaltString};
use argon2::{Argon2, PasswordHash};
use log::{info, warn};
use rand::rngs::OsRng;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Authentication failure taxonomy.
#[derive(Debug)]
pub enum AuthError {
    /// Supplied password does not match the stored record.
    IncorrectPassword,
    /// Hashing or hash parsing failed.
    Hash(String),
    Repo(RepoError),
}

impl Display for AuthError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::IncorrectPassword => write!(f, "incorrect password"),
            Self::Hash(message) => write!(f, "password hashing failed: {message}"),
            Self::Repo(err) => write!(f, "{err}"),
        }
    }
}

impl Error for AuthError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RepoError> for AuthError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

/// Credential store facade over a repository implementation.
pub struct CredentialService<R: CredentialRepository> {
    repo: R,
}

impl<R: CredentialRepository> CredentialService<R> {
    pub fn new(repo: R) -> Self {
        Self { repo }
    }

    /// Creates a record for an unknown email, or verifies the password of
    /// a known one.
    ///
    /// # Errors
    /// - `AuthError::IncorrectPassword` when a record exists and the
    ///   supplied password does not verify against it.
    pub fn register_or_verify(&self, email: &str, password: &str) -> Result<(), AuthError> {
        let email = normalize_email(email);
        match self.repo.find(&email)? {
            Some(record) => {
                let parsed = PasswordHash::new(&record.password_hash)
                    .map_err(|err| AuthError::Hash(err.to_string()))?;
                if Argon2::default()
                    .verify_password(password.as_bytes(), &parsed)
                    .is_err()
                {
                    warn!("event=credential_verify module=auth status=rejected");
                    return Err(AuthError::IncorrectPassword);
                }
                Ok(())
            }
            None => {
                let record = CredentialRecord {
                    email,
                    password_hash: hash_password(password)?,
                };
                self.repo.upsert(&record)?;
                info!("event=credential_register module=auth status=ok");
                Ok(())
            }
        }
    }

    /// Overwrites the stored hash unconditionally. Account-settings path;
    /// not gated by the old password.
    pub fn update_password(&self, email: &str, new_password: &str) -> Result<(), AuthError> {
        let record = CredentialRecord {
            email: normalize_email(email),
            password_hash: hash_password(new_password)?,
        };
        self.repo.upsert(&record)?;
        info!("event=credential_update module=auth status=ok");
        Ok(())
    }
}

fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|err| AuthError::Hash(err.to_string()))
}
