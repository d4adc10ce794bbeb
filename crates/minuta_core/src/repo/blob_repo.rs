//! Namespaced blob persistence.
//!
//! # Responsibility
//! - Map `(namespace, resource kind)` to one durable JSON payload.
//! - Keep the storage partition between accounts explicit in every call.
//!
//! # Invariants
//! - A completed `save` is visible to any subsequent `load` of the same
//!   `(namespace, kind)` on this connection.
//! - The repository never interprets payload contents; decoding and
//!   corrupt-state fallback live with the callers.

use crate::repo::{ensure_table, RepoResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::fmt::{Display, Formatter};

/// Storage partition for anonymous sessions.
pub const GUEST_NAMESPACE: &str = "guest";

/// Storage partition key derived from the active identity.
///
/// Passed explicitly into every persistence call so account isolation is
/// visible in signatures instead of living in ambient state.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamespaceKey(String);

impl NamespaceKey {
    /// Fixed partition used while no account is signed in.
    pub fn guest() -> Self {
        Self(GUEST_NAMESPACE.to_string())
    }

    /// Partition for an authenticated account, case-normalized.
    pub fn for_email(email: &str) -> Self {
        Self(format!("users:{}", email.trim().to_lowercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for NamespaceKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Logical resource kinds persisted per namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Templates,
    MinutesHistory,
}

impl ResourceKind {
    pub fn as_db_str(self) -> &'static str {
        match self {
            Self::Templates => "templates",
            Self::MinutesHistory => "minutes",
        }
    }
}

/// Persistence contract for namespaced state blobs.
pub trait BlobRepository {
    fn load(&self, namespace: &NamespaceKey, kind: ResourceKind) -> RepoResult<Option<String>>;
    fn save(&self, namespace: &NamespaceKey, kind: ResourceKind, payload: &str) -> RepoResult<()>;
}

/// SQLite-backed blob repository.
pub struct SqliteBlobRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteBlobRepository<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table(conn, "namespace_blobs")?;
        Ok(Self { conn })
    }
}

impl BlobRepository for SqliteBlobRepository<'_> {
    fn load(&self, namespace: &NamespaceKey, kind: ResourceKind) -> RepoResult<Option<String>> {
        let payload = self
            .conn
            .query_row(
                "SELECT payload FROM namespace_blobs WHERE namespace = ?1 AND kind = ?2;",
                params![namespace.as_str(), kind.as_db_str()],
                |row| row.get(0),
            )
            .optional()?;
        Ok(payload)
    }

    fn save(&self, namespace: &NamespaceKey, kind: ResourceKind, payload: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO namespace_blobs (namespace, kind, payload) VALUES (?1, ?2, ?3)
             ON CONFLICT (namespace, kind) DO UPDATE SET
                payload = excluded.payload,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![namespace.as_str(), kind.as_db_str(), payload],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::NamespaceKey;

    #[test]
    fn namespace_key_normalizes_email_case() {
        assert_eq!(
            NamespaceKey::for_email(" Alice@Example.COM "),
            NamespaceKey::for_email("alice@example.com")
        );
        assert_eq!(
            NamespaceKey::for_email("alice@example.com").as_str(),
            "users:alice@example.com"
        );
    }

    #[test]
    fn guest_namespace_is_fixed() {
        assert_eq!(NamespaceKey::guest().as_str(), "guest");
    }
}
