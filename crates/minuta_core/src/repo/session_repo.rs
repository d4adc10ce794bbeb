//! Session identity storage tiers.
//!
//! Two tiers back the session lifecycle: a durable SQLite slot that
//! survives restarts and an in-memory slot scoped to the current process.
//! Both sit behind one [`SessionStore`] contract so the session manager
//! can treat tier choice as data.

use crate::model::identity::Identity;
use crate::repo::{ensure_table, RepoResult};
use rusqlite::{Connection, OptionalExtension};

/// Storage contract for one session identity slot.
pub trait SessionStore {
    fn get(&self) -> RepoResult<Option<Identity>>;
    fn put(&mut self, identity: &Identity) -> RepoResult<()>;
    fn clear(&mut self) -> RepoResult<()>;
}

/// Durable tier: survives application restarts.
pub struct SqliteSessionStore<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteSessionStore<'conn> {
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_table(conn, "session_slot")?;
        Ok(Self { conn })
    }
}

impl SessionStore for SqliteSessionStore<'_> {
    fn get(&self) -> RepoResult<Option<Identity>> {
        let email: Option<String> = self
            .conn
            .query_row("SELECT email FROM session_slot WHERE slot = 0;", [], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(email.map(Identity::new))
    }

    fn put(&mut self, identity: &Identity) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO session_slot (slot, email) VALUES (0, ?1)
             ON CONFLICT (slot) DO UPDATE SET
                email = excluded.email,
                updated_at = (strftime('%s', 'now') * 1000);",
            [identity.email.as_str()],
        )?;
        Ok(())
    }

    fn clear(&mut self) -> RepoResult<()> {
        self.conn.execute("DELETE FROM session_slot;", [])?;
        Ok(())
    }
}

/// Short-lived tier: scoped to the current run, never persisted.
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    identity: Option<Identity>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for MemorySessionStore {
    fn get(&self) -> RepoResult<Option<Identity>> {
        Ok(self.identity.clone())
    }

    fn put(&mut self, identity: &Identity) -> RepoResult<()> {
        self.identity = Some(identity.clone());
        Ok(())
    }

    fn clear(&mut self) -> RepoResult<()> {
        self.identity = None;
        Ok(())
    }
}
