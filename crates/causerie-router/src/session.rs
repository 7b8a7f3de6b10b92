// SPDX-FileCopyrightText: 2026 Causerie Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Per-connection conversation state.

use causerie_core::types::{ChatMessage, SessionId};

use crate::tools::{TurnOptions, ToolToggles};

/// One user's conversation: history, active model, and tool toggles.
///
/// History is append-only except for [`Session::rollback_to`], which the
/// router uses to drop the user turn of a failed exchange.
#[derive(Debug, Clone)]
pub struct Session {
    id: SessionId,
    model: String,
    history: Vec<ChatMessage>,
    toggles: ToolToggles,
}

impl Session {
    pub fn new(model: impl Into<String>, toggles: ToolToggles) -> Self {
        Self::with_id(SessionId::new(), model, toggles)
    }

    pub(crate) fn with_id(id: SessionId, model: impl Into<String>, toggles: ToolToggles) -> Self {
        Self {
            id,
            model: model.into(),
            history: Vec::new(),
            toggles,
        }
    }

    pub fn id(&self) -> &SessionId {
        &self.id
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn history(&self) -> &[ChatMessage] {
        &self.history
    }

    pub fn toggles(&self) -> ToolToggles {
        self.toggles
    }

    pub fn apply_options(&mut self, options: &TurnOptions) {
        options.apply_to(&mut self.toggles);
    }

    pub(crate) fn push(&mut self, message: ChatMessage) {
        self.history.push(message);
    }

    /// Restores history to `len` turns.
    pub(crate) fn rollback_to(&mut self, len: usize) {
        self.history.truncate(len);
    }
}
