//! Session lifecycle management.
//!
//! # Responsibility
//! - Track the current signed-in identity (or anonymous).
//! - Choose between durable and short-lived storage at sign-in.
//! - Expose the active namespace for persistence calls.
//!
//! # Invariants
//! - Exactly one active session per running instance.
//! - Restore prefers the durable tier over the short-lived tier.
//! - Sign-out clears both tiers but never touches namespaced data.

use crate::model::identity::Identity;
use crate::repo::blob_repo::NamespaceKey;
use crate::repo::session_repo::SessionStore;
use crate::repo::RepoResult;
use log::info;

/// Current session state: anonymous or an authenticated identity plus the
/// tier it was written to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub identity: Option<Identity>,
    pub durable: bool,
}

impl Session {
    pub fn anonymous() -> Self {
        Self {
            identity: None,
            durable: false,
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.identity.is_some()
    }
}

/// Two-tier session manager.
///
/// `D` is the durable tier, `S` the short-lived tier. The manager is the
/// only writer of either tier.
pub struct SessionManager<D: SessionStore, S: SessionStore> {
    durable: D,
    short_lived: S,
    current: Session,
}

impl<D: SessionStore, S: SessionStore> SessionManager<D, S> {
    pub fn new(durable: D, short_lived: S) -> Self {
        Self {
            durable,
            short_lived,
            current: Session::anonymous(),
        }
    }

    /// Restores the session at startup: durable tier first, then
    /// short-lived, else anonymous.
    pub fn restore(&mut self) -> RepoResult<&Session> {
        self.current = if let Some(identity) = self.durable.get()? {
            Session {
                identity: Some(identity),
                durable: true,
            }
        } else if let Some(identity) = self.short_lived.get()? {
            Session {
                identity: Some(identity),
                durable: false,
            }
        } else {
            Session::anonymous()
        };

        info!(
            "event=session_restore module=session status=ok authenticated={} durable={}",
            self.current.is_authenticated(),
            self.current.durable
        );
        Ok(&self.current)
    }

    /// Replaces the active session, writing the identity to the chosen
    /// tier and clearing the other.
    pub fn sign_in(&mut self, identity: Identity, durable: bool) -> RepoResult<()> {
        if durable {
            self.durable.put(&identity)?;
            self.short_lived.clear()?;
        } else {
            self.short_lived.put(&identity)?;
            self.durable.clear()?;
        }

        info!(
            "event=session_sign_in module=session status=ok namespace={} durable={durable}",
            NamespaceKey::for_email(&identity.email)
        );
        self.current = Session {
            identity: Some(identity),
            durable,
        };
        Ok(())
    }

    /// Clears both tiers and resets to anonymous. Namespaced data stays
    /// retrievable on the next sign-in.
    pub fn sign_out(&mut self) -> RepoResult<()> {
        self.durable.clear()?;
        self.short_lived.clear()?;
        self.current = Session::anonymous();
        info!("event=session_sign_out module=session status=ok");
        Ok(())
    }

    pub fn current(&self) -> &Session {
        &self.current
    }

    /// Returns the storage partition of the active session.
    pub fn active_namespace(&self) -> NamespaceKey {
        match &self.current.identity {
            Some(identity) => NamespaceKey::for_email(&identity.email),
            None => NamespaceKey::guest(),
        }
    }
}
