// SPDX-FileCopyrightText: 2026 Causerie Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Session table: one entry per live connection.
//!
//! Each session sits behind its own async mutex, so turns for one session run
//! one at a time in arrival order while different sessions proceed in parallel.

use std::sync::Arc;

use dashmap::DashMap;
use tokio::sync::Mutex;
use tracing::{debug, info};

use causerie_core::CauserieError;
use causerie_core::types::SessionId;

use crate::session::Session;
use crate::tools::ToolToggles;

/// Shared handle to one session.
pub type SharedSession = Arc<Mutex<Session>>;

/// Map from session id to session, with explicit create/destroy lifecycle.
pub struct SessionTable {
    sessions: DashMap<SessionId, SharedSession>,
    default_toggles: ToolToggles,
}

impl SessionTable {
    /// New sessions start with `default_toggles`.
    pub fn new(default_toggles: ToolToggles) -> Self {
        Self {
            sessions: DashMap::new(),
            default_toggles,
        }
    }

    /// Registers a fresh session bound to `model`.
    pub fn create_session(&self, model: &str) -> (SessionId, SharedSession) {
        let session = Session::new(model, self.default_toggles);
        let id = session.id().clone();
        let shared = Arc::new(Mutex::new(session));
        self.sessions.insert(id.clone(), Arc::clone(&shared));
        info!(session_id = %id, model, "session created");
        (id, shared)
    }

    /// Removes a session. Returns false if it was already gone.
    pub fn destroy_session(&self, id: &SessionId) -> bool {
        let removed = self.sessions.remove(id).is_some();
        if removed {
            info!(session_id = %id, "session destroyed");
        }
        removed
    }

    pub fn get(&self, id: &SessionId) -> Option<SharedSession> {
        self.sessions.get(id).map(|entry| Arc::clone(entry.value()))
    }

    /// Replaces the session's state with a fresh one bound to `model`.
    ///
    /// History and toggles are reset. Waits for any in-flight turn.
    pub async fn reset_session(&self, id: &SessionId, model: &str) -> Result<(), CauserieError> {
        let shared = self
            .get(id)
            .ok_or_else(|| CauserieError::SessionNotFound(id.to_string()))?;
        let mut session = shared.lock().await;
        *session = Session::with_id(id.clone(), model, self.default_toggles);
        debug!(session_id = %id, model, "session reset");
        Ok(())
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

impl Default for SessionTable {
    fn default() -> Self {
        Self::new(ToolToggles::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn create_and_destroy() {
        let table = SessionTable::default();
        let (id, session) = table.create_session("llama3.2");
        assert_eq!(table.len(), 1);
        assert_eq!(session.lock().await.model(), "llama3.2");
        assert!(table.get(&id).is_some());

        assert!(table.destroy_session(&id));
        assert!(table.is_empty());
        assert!(table.get(&id).is_none());
        assert!(!table.destroy_session(&id));
    }

    #[tokio::test]
    async fn sessions_are_independent() {
        let table = SessionTable::new(ToolToggles::new(true, false));
        let (a, _) = table.create_session("llama3.2");
        let (b, _) = table.create_session("mistral");
        assert_ne!(a, b);
        assert_eq!(table.get(&b).unwrap().lock().await.model(), "mistral");
        assert!(table.get(&a).unwrap().lock().await.toggles().web_search_enabled);
    }

    #[tokio::test]
    async fn reset_keeps_id_and_clears_state() {
        let table = SessionTable::default();
        let (id, shared) = table.create_session("llama3.2");
        {
            let mut session = shared.lock().await;
            session.push(causerie_core::ChatMessage::user("salut"));
            session.apply_options(&crate::tools::TurnOptions {
                web_search_enabled: Some(true),
                finance_enabled: Some(true),
            });
        }
        table.reset_session(&id, "phi").await.unwrap();

        let session = shared.lock().await;
        assert_eq!(session.id(), &id);
        assert_eq!(session.model(), "phi");
        assert!(session.history().is_empty());
        assert_eq!(session.toggles(), ToolToggles::default());
    }

    #[tokio::test]
    async fn reset_unknown_session_fails() {
        let table = SessionTable::default();
        let err = table
            .reset_session(&SessionId::new(), "phi")
            .await
            .unwrap_err();
        assert!(matches!(err, CauserieError::SessionNotFound(_)));
    }
}
