// SPDX-FileCopyrightText: 2026 Causerie Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Scripted model backend.
//!
//! `MockProvider` implements `ProviderAdapter` with replies popped from a FIFO
//! queue. Each entry is either text or a failure, so tests can fail the
//! classification or the composition call precisely. Every request is recorded.

use std::collections::VecDeque;
use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use causerie_core::traits::{PluginAdapter, ProviderAdapter};
use causerie_core::types::{
    AdapterType, HealthStatus, ModelSummary, ProviderRequest, ProviderResponse,
};
use causerie_core::CauserieError;

/// One scripted outcome of a `chat` call.
#[derive(Debug, Clone)]
enum Scripted {
    Reply(String),
    Failure(String),
}

/// A mock model backend with scripted replies.
///
/// When the queue is empty, `chat` answers "mock response".
#[derive(Clone)]
pub struct MockProvider {
    script: Arc<Mutex<VecDeque<Scripted>>>,
    requests: Arc<Mutex<Vec<ProviderRequest>>>,
    installed: Arc<Option<Vec<ModelSummary>>>,
}

impl MockProvider {
    /// Empty script; `llama3.2:latest` is installed.
    pub fn new() -> Self {
        Self::build(VecDeque::new(), Some(vec![model("llama3.2:latest")]))
    }

    /// Pre-loads text replies in order.
    pub fn with_responses<I, S>(responses: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let script = responses
            .into_iter()
            .map(|r| Scripted::Reply(r.into()))
            .collect();
        Self::build(script, Some(vec![model("llama3.2:latest")]))
    }

    /// Replaces the installed model list.
    pub fn with_installed(self, names: &[&str]) -> Self {
        Self::build(
            self.take_script(),
            Some(names.iter().map(|n| model(n)).collect()),
        )
    }

    /// Makes `list_models` fail as if the backend were unreachable.
    pub fn unreachable(self) -> Self {
        Self::build(self.take_script(), None)
    }

    fn build(script: VecDeque<Scripted>, installed: Option<Vec<ModelSummary>>) -> Self {
        Self {
            script: Arc::new(Mutex::new(script)),
            requests: Arc::new(Mutex::new(Vec::new())),
            installed: Arc::new(installed),
        }
    }

    fn take_script(self) -> VecDeque<Scripted> {
        Arc::try_unwrap(self.script)
            .map(Mutex::into_inner)
            .unwrap_or_default()
    }

    /// Appends a text reply.
    pub async fn push_reply(&self, text: impl Into<String>) {
        self.script.lock().await.push_back(Scripted::Reply(text.into()));
    }

    /// Appends a failing call.
    pub async fn push_failure(&self, message: impl Into<String>) {
        self.script
            .lock()
            .await
            .push_back(Scripted::Failure(message.into()));
    }

    /// All requests received so far, oldest first.
    pub async fn requests(&self) -> Vec<ProviderRequest> {
        self.requests.lock().await.clone()
    }

    /// Number of `chat` calls received.
    pub async fn call_count(&self) -> usize {
        self.requests.lock().await.len()
    }
}

impl Default for MockProvider {
    fn default() -> Self {
        Self::new()
    }
}

fn model(name: &str) -> ModelSummary {
    ModelSummary {
        name: name.to_string(),
        size: 2_019_393_189,
        modified_at: "2026-01-01T00:00:00Z".to_string(),
    }
}

#[async_trait]
impl PluginAdapter for MockProvider {
    fn name(&self) -> &str {
        "mock-provider"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Provider
    }

    async fn health_check(&self) -> Result<HealthStatus, CauserieError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl ProviderAdapter for MockProvider {
    async fn chat(&self, request: ProviderRequest) -> Result<ProviderResponse, CauserieError> {
        let model = request.model.clone();
        self.requests.lock().await.push(request);
        let next = self.script.lock().await.pop_front();
        match next {
            Some(Scripted::Failure(message)) => Err(CauserieError::Provider {
                message,
                source: None,
            }),
            Some(Scripted::Reply(content)) => Ok(ProviderResponse { content, model }),
            None => Ok(ProviderResponse {
                content: "mock response".to_string(),
                model,
            }),
        }
    }

    async fn list_models(&self) -> Result<Vec<ModelSummary>, CauserieError> {
        self.installed
            .as_ref()
            .clone()
            .ok_or_else(|| CauserieError::Provider {
                message: "connection refused".to_string(),
                source: None,
            })
    }

    async fn model_info(&self, model: &str) -> Result<serde_json::Value, CauserieError> {
        Ok(serde_json::json!({ "model": model, "details": { "family": "mock" } }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use causerie_core::types::{ChatMessage, ResponseFormat};

    fn req() -> ProviderRequest {
        ProviderRequest {
            model: "llama3.2".to_string(),
            messages: vec![ChatMessage::user("salut")],
            format: ResponseFormat::Text,
        }
    }

    #[tokio::test]
    async fn replies_in_order_then_default() {
        let provider = MockProvider::with_responses(["first", "second"]);
        assert_eq!(provider.chat(req()).await.unwrap().content, "first");
        assert_eq!(provider.chat(req()).await.unwrap().content, "second");
        assert_eq!(provider.chat(req()).await.unwrap().content, "mock response");
        assert_eq!(provider.call_count().await, 3);
    }

    #[tokio::test]
    async fn scripted_failure_is_returned() {
        let provider = MockProvider::new();
        provider.push_failure("boom").await;
        provider.push_reply("after").await;
        assert!(provider.chat(req()).await.is_err());
        assert_eq!(provider.chat(req()).await.unwrap().content, "after");
    }

    #[tokio::test]
    async fn model_availability_uses_prefix_match() {
        let provider = MockProvider::new().with_installed(&["mistral:7b"]);
        assert!(provider.is_model_available("mistral").await);
        assert!(!provider.is_model_available("phi").await);
    }

    #[tokio::test]
    async fn unreachable_backend_reports_unavailable() {
        let provider = MockProvider::new().unreachable();
        assert!(provider.list_models().await.is_err());
        assert!(!provider.is_model_available("llama3.2").await);
    }
}
