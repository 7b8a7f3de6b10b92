// SPDX-FileCopyrightText: 2026 Causerie Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ollama model backend.
//!
//! Implements [`ProviderAdapter`] against a local Ollama server: chat
//! completion with optional JSON mode, installed-model listing, and model
//! inspection.

pub mod client;
pub mod types;

use std::time::Duration;

use async_trait::async_trait;
use causerie_config::OllamaConfig;
use causerie_core::CauserieError;
use causerie_core::traits::{PluginAdapter, ProviderAdapter};
use causerie_core::types::{
    AdapterType, HealthStatus, ModelSummary, ProviderRequest, ProviderResponse, ResponseFormat,
};
use tracing::{debug, info};

use crate::client::OllamaClient;
use crate::types::{ChatRequest, WireMessage};

/// Ollama-backed [`ProviderAdapter`].
pub struct OllamaProvider {
    client: OllamaClient,
}

impl OllamaProvider {
    pub fn new(config: &OllamaConfig) -> Result<Self, CauserieError> {
        let client = OllamaClient::new(
            &config.base_url,
            Duration::from_secs(config.request_timeout_secs),
        )?;
        info!(base_url = %config.base_url, default_model = %config.default_model, "Ollama provider initialized");
        Ok(Self { client })
    }

    pub fn with_client(client: OllamaClient) -> Self {
        Self { client }
    }

    fn to_chat_request(request: &ProviderRequest) -> ChatRequest {
        ChatRequest {
            model: request.model.clone(),
            messages: request
                .messages
                .iter()
                .map(|m| WireMessage {
                    role: m.role.to_string(),
                    content: m.content.clone(),
                })
                .collect(),
            stream: false,
            format: match request.format {
                ResponseFormat::Json => Some("json".to_string()),
                ResponseFormat::Text => None,
            },
        }
    }
}

#[async_trait]
impl PluginAdapter for OllamaProvider {
    fn name(&self) -> &str {
        "ollama"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, CauserieError> {
        match self.client.version().await {
            Ok(v) => {
                debug!(version = %v.version, "Ollama reachable");
                Ok(HealthStatus::Healthy)
            }
            Err(e) => Ok(HealthStatus::Unhealthy(e.to_string())),
        }
    }
}

#[async_trait]
impl ProviderAdapter for OllamaProvider {
    async fn chat(&self, request: ProviderRequest) -> Result<ProviderResponse, CauserieError> {
        let wire = Self::to_chat_request(&request);
        let response = self.client.chat(&wire).await?;
        Ok(ProviderResponse {
            content: response.message.content,
            model: response.model,
        })
    }

    async fn list_models(&self) -> Result<Vec<ModelSummary>, CauserieError> {
        let tags = self.client.tags().await?;
        Ok(tags
            .models
            .into_iter()
            .map(|m| ModelSummary {
                name: m.name,
                size: m.size,
                modified_at: m.modified_at,
            })
            .collect())
    }

    async fn model_info(&self, model: &str) -> Result<serde_json::Value, CauserieError> {
        self.client.show(model).await
    }
}
