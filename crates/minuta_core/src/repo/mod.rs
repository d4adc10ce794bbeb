//! Repository layer abstractions and SQLite implementations.
//!
//! # Responsibility
//! - Define data access contracts for namespaced blobs, credentials and
//!   session tiers.
//! - Isolate SQL details from service orchestration.
//!
//! # Invariants
//! - SQLite repositories refuse connections whose schema version or
//!   tables do not match this binary.
//! - Repository APIs return semantic errors in addition to DB transport
//!   errors.

use crate::db::DbError;
use rusqlite::Connection;
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod blob_repo;
pub mod credential_repo;
pub mod session_repo;

pub type RepoResult<T> = Result<T, RepoError>;

/// Generic repository error for persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    /// State could not be serialized for persistence.
    Encode(String),
    /// Connection has not had migrations applied.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    MissingRequiredTable(&'static str),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::Encode(message) => write!(f, "failed to encode persisted state: {message}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "connection schema version {actual_version} does not match expected {expected_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "required table is missing: {table}")
            }
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Checks that `conn` carries the expected schema version and `table`.
///
/// Called by every SQLite repository constructor so repositories never
/// operate on an unmigrated connection.
pub(crate) fn ensure_table(conn: &Connection, table: &'static str) -> RepoResult<()> {
    let actual: u32 = conn.query_row("PRAGMA user_version;", [], |row| row.get(0))?;
    let expected = crate::db::migrations::latest_version();
    if actual != expected {
        return Err(RepoError::UninitializedConnection {
            expected_version: expected,
            actual_version: actual,
        });
    }

    let present: bool = conn.query_row(
        "SELECT EXISTS (SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1);",
        [table],
        |row| row.get(0),
    )?;
    if !present {
        return Err(RepoError::MissingRequiredTable(table));
    }

    Ok(())
}
