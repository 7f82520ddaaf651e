//! SessionRegistry - the dual-index session store.
//!
//! All rendezvous state lives here: a primary index from session id to
//! [`Session`] and a secondary index from host description back to id. The
//! two indices are co-maintained in every operation; eviction always removes
//! both sides in the same call so no reader can observe a half-removed
//! session.

use std::collections::HashMap;

use tracing::debug;

use crate::error::{RegistryError, RegistryResult};
use crate::id::generate_session_id;
use crate::session::Session;

// =============================================================================
// Registry
// =============================================================================

/// The session registry.
///
/// One instance exists per process, constructed at startup and owned by the
/// transport boundary behind a mutex; the registry itself is plain mutable
/// state and every operation is synchronous and O(1).
///
/// Invariants:
/// - at most one live session per id
/// - at most one live session per distinct host description
/// - every secondary-index entry points at a primary-index session carrying
///   that exact description, and vice versa
#[derive(Debug, Default)]
pub struct SessionRegistry {
    /// Primary index: session id -> session record
    sessions: HashMap<String, Session>,
    /// Secondary index: host description -> session id
    by_description: HashMap<String, String>,
}

impl SessionRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live sessions.
    pub fn session_count(&self) -> usize {
        self.sessions.len()
    }

    // -------------------------------------------------------------------------
    // Host operations
    // -------------------------------------------------------------------------

    /// Register a host description and return the id guests should join with.
    ///
    /// The effective id is, in order of preference: the caller-supplied
    /// `requested_id`, the id already mapped to `description` (so
    /// re-registering the same description reuses its id), or a freshly
    /// generated one.
    ///
    /// Before the new record is written, any session already live under the
    /// effective id and any session already holding `description` are both
    /// evicted, discarding an in-flight guest description either of them may
    /// have held.
    pub fn register_host(
        &mut self,
        description: &str,
        requested_id: Option<&str>,
    ) -> RegistryResult<String> {
        if description.is_empty() {
            return Err(RegistryError::invalid_argument("empty description"));
        }

        let resolved = match requested_id {
            Some(id) if !id.is_empty() => Some(id.to_string()),
            _ => self.by_description.get(description).cloned(),
        };

        if let Some(id) = &resolved {
            if self.evict(id).is_some() {
                debug!(%id, "evicted prior session with colliding id");
            }
        }
        if let Some(holder) = self.by_description.get(description).cloned() {
            self.evict(&holder);
            debug!(id = %holder, "evicted prior session with colliding description");
        }

        let id = match resolved {
            Some(id) => id,
            None => self.fresh_id(),
        };

        self.sessions.insert(id.clone(), Session::new(description));
        self.by_description.insert(description.to_string(), id.clone());

        debug!(%id, "host registered");
        Ok(id)
    }

    /// Fetch the host description a guest needs to join session `id`.
    ///
    /// Fails with [`RegistryError::Conflict`] once a guest has already
    /// joined: an occupied session must not be re-advertised.
    pub fn fetch_host(&self, id: &str) -> RegistryResult<String> {
        let session = self
            .sessions
            .get(id)
            .ok_or_else(|| RegistryError::not_found(format!("no session for id {id:?}")))?;

        if session.is_matched() {
            return Err(RegistryError::conflict(format!(
                "host {id:?} already in a call"
            )));
        }

        Ok(session.host_description().to_string())
    }

    // -------------------------------------------------------------------------
    // Guest operations
    // -------------------------------------------------------------------------

    /// Deposit a guest description into the session registered under
    /// `host_id`.
    ///
    /// A value deposited before the host has consumed the previous one is
    /// silently replaced; the registry assumes a single guest per session.
    pub fn register_guest(
        &mut self,
        host_id: &str,
        guest_description: &str,
    ) -> RegistryResult<()> {
        if host_id.is_empty() {
            return Err(RegistryError::invalid_argument("empty host id"));
        }
        if guest_description.is_empty() {
            return Err(RegistryError::invalid_argument("empty guest description"));
        }

        let session = self
            .sessions
            .get_mut(host_id)
            .ok_or_else(|| RegistryError::not_found(format!("no session for id {host_id:?}")))?;

        session.set_guest_description(guest_description);
        debug!(id = %host_id, "guest joined");
        Ok(())
    }

    /// Retrieve the guest description for `host_id`, consuming the session
    /// if a guest has joined.
    ///
    /// An empty return value means no guest has joined yet and the session
    /// remains open for a later poll. A non-empty return value is the single
    /// reclamation point of the protocol: the session is removed from both
    /// indices before this returns, so the value is observable exactly once.
    pub fn fetch_guest(&mut self, host_id: &str) -> RegistryResult<String> {
        if host_id.is_empty() {
            return Err(RegistryError::invalid_argument("empty host id"));
        }

        let session = self
            .sessions
            .get(host_id)
            .ok_or_else(|| RegistryError::not_found(format!("no session for id {host_id:?}")))?;

        let guest_description = session.guest_description().to_string();
        if !guest_description.is_empty() {
            self.evict(host_id);
            debug!(id = %host_id, "session consumed");
        }

        Ok(guest_description)
    }

    // -------------------------------------------------------------------------
    // Index maintenance
    // -------------------------------------------------------------------------

    /// Remove the session under `id` from both indices.
    ///
    /// The one place sessions are destroyed; both indices are updated here so
    /// they can never drift apart.
    fn evict(&mut self, id: &str) -> Option<Session> {
        let session = self.sessions.remove(id)?;
        self.by_description.remove(session.host_description());
        Some(session)
    }

    /// Generate an id not currently in use.
    fn fresh_id(&self) -> String {
        loop {
            let id = generate_session_id();
            if !self.sessions.contains_key(&id) {
                return id;
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
