//! Credential storage.
//!
//! # Invariants
//! - At most one record per email; emails are keyed lowercase.
//! - `password_hash` is an opaque PHC string; hashing and verification
//!   live in the credential service.

use crate::model::identity::normalize_email;
use crate::repo::{ensure_table, RepoResult};
use rusqlite::{params, Connection, OptionalExtension};

/// One stored account credential.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CredentialRecord {
    pub email: String,
    pub password_hash: String,
}

/// Storage contract for account credentials.
pub trait CredentialRepository {
    fn find(&self, email: &str) -> RepoResult<Option<CredentialRecord>>;
    fn upsert(&self, record: &CredentialRecord) -> RepoResult<()>;
}

/// SQLite-backed credential repository.
pub struct SqliteCredentialRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCredentialRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table(conn, "credentials")?;
        Ok(Self { conn })
    }
}

impl CredentialRepository for SqliteCredentialRepository<'_> {
    fn find(&self, email: &str) -> RepoResult<Option<CredentialRecord>> {
        let email = normalize_email(email);
        let record = self
            .conn
            .query_row(
                "SELECT email, password_hash FROM credentials WHERE email = ?1;",
                [email.as_str()],
                |row| {
                    Ok(CredentialRecord {
                        email: row.get(0)?,
                        password_hash: row.get(1)?,
                    })
                },
            )
            .optional()?;
        Ok(record)
    }

    fn upsert(&self, record: &CredentialRecord) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO credentials (email, password_hash) VALUES (?1, ?2)
             ON CONFLICT (email) DO UPDATE SET
                password_hash = excluded.password_hash,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![normalize_email(&record.email), record.password_hash],
        )?;
        Ok(())
    }
}
