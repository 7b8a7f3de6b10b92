// SPDX-FileCopyrightText: 2026 Causerie Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Model backend trait: chat completion plus installed-model discovery.

use async_trait::async_trait;
use tracing::warn;

use crate::error::CauserieError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{ModelSummary, ProviderRequest, ProviderResponse};

/// Adapter for the language-model backend.
#[async_trait]
pub trait ProviderAdapter: PluginAdapter {
    /// Sends a chat-completion request and returns the generated text.
    async fn chat(&self, request: ProviderRequest) -> Result<ProviderResponse, CauserieError>;

    /// Lists the models installed on the backend.
    async fn list_models(&self) -> Result<Vec<ModelSummary>, CauserieError>;

    /// Returns backend-specific details for a model.
    async fn model_info(&self, model: &str) -> Result<serde_json::Value, CauserieError>;

    /// Returns true if `model` is installed, matching either the exact name
    /// or a tagged variant (`llama3.2` matches `llama3.2:latest`).
    ///
    /// Backend failures are logged and reported as unavailable.
    async fn is_model_available(&self, model: &str) -> bool {
        match self.list_models().await {
            Ok(models) => models
                .iter()
                .any(|m| m.name == model || m.name.starts_with(model)),
            Err(e) => {
                warn!(model, error = %e, "failed to list models");
                false
            }
        }
    }
}
