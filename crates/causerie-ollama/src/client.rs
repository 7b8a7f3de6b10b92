// SPDX-FileCopyrightText: 2026 Causerie Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP client for a local Ollama server.
//!
//! Every call is a single attempt. A failed chat call surfaces as a
//! provider error and the caller decides what to do with the turn.

use std::time::Duration;

use causerie_core::CauserieError;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::types::{
    ApiErrorResponse, ChatRequest, ChatResponse, ShowRequest, TagsResponse, VersionResponse,
};

/// Thin wrapper over `reqwest::Client` bound to one Ollama base URL.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    client: reqwest::Client,
    base_url: String,
}

impl OllamaClient {
    /// Creates a client for `base_url` (e.g. `http://localhost:11434`).
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CauserieError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CauserieError::Provider {
                message: format!("failed to build HTTP client: {e}"),
                source: Some(Box::new(e)),
            })?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    /// `POST /api/chat` without streaming.
    pub async fn chat(&self, request: &ChatRequest) -> Result<ChatResponse, CauserieError> {
        let response = self
            .client
            .post(self.url("/api/chat"))
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        debug!(status = %status, model = %request.model, "chat response received");
        check_and_read(response).await
    }

    /// `GET /api/tags`: installed models.
    pub async fn tags(&self) -> Result<TagsResponse, CauserieError> {
        let response = self
            .client
            .get(self.url("/api/tags"))
            .send()
            .await
            .map_err(transport_error)?;
        check_and_read(response).await
    }

    /// `POST /api/show`: details for one model.
    pub async fn show(&self, model: &str) -> Result<serde_json::Value, CauserieError> {
        let response = self
            .client
            .post(self.url("/api/show"))
            .json(&ShowRequest {
                model: model.to_string(),
            })
            .send()
            .await
            .map_err(transport_error)?;
        check_and_read(response).await
    }

    /// `GET /api/version`.
    pub async fn version(&self) -> Result<VersionResponse, CauserieError> {
        let response = self
            .client
            .get(self.url("/api/version"))
            .send()
            .await
            .map_err(transport_error)?;
        check_and_read(response).await
    }
}

async fn check_and_read<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, CauserieError> {
    let status = response.status();
    if status.is_success() {
        read_json(response).await
    } else {
        let body = response.text().await.unwrap_or_default();
        Err(status_error(status, &body))
    }
}

async fn read_json<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, CauserieError> {
    let body = response.text().await.map_err(|e| CauserieError::Provider {
        message: format!("failed to read response body: {e}"),
        source: Some(Box::new(e)),
    })?;
    serde_json::from_str(&body).map_err(|e| CauserieError::Provider {
        message: format!("failed to parse Ollama response: {e}"),
        source: Some(Box::new(e)),
    })
}

fn transport_error(e: reqwest::Error) -> CauserieError {
    CauserieError::Provider {
        message: format!("HTTP request failed: {e}"),
        source: Some(Box::new(e)),
    }
}

fn status_error(status: reqwest::StatusCode, body: &str) -> CauserieError {
    let message = match serde_json::from_str::<ApiErrorResponse>(body) {
        Ok(api_err) => format!("Ollama error ({status}): {}", api_err.error),
        Err(_) => format!("Ollama returned {status}: {body}"),
    };
    CauserieError::Provider {
        message,
        source: None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::WireMessage;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> OllamaClient {
        OllamaClient::new(&server.uri(), Duration::from_secs(5)).unwrap()
    }

    fn request(format: Option<&str>) -> ChatRequest {
        ChatRequest {
            model: "llama3.2".into(),
            messages: vec![WireMessage {
                role: "user".into(),
                content: "Bonjour".into(),
            }],
            stream: false,
            format: format.map(String::from),
        }
    }

    fn reply(content: &str) -> serde_json::Value {
        serde_json::json!({
            "model": "llama3.2",
            "created_at": "2026-10-18T10:00:00Z",
            "message": {"role": "assistant", "content": content},
            "done": true
        })
    }

    #[tokio::test]
    async fn chat_success() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(serde_json::json!({"model": "llama3.2", "stream": false})))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply("Salut !")))
            .mount(&server)
            .await;

        let response = client(&server).chat(&request(None)).await.unwrap();
        assert_eq!(response.message.content, "Salut !");
        assert!(response.done);
    }

    #[tokio::test]
    async fn chat_sends_json_format() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .and(body_partial_json(serde_json::json!({"format": "json"})))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply("{}")))
            .expect(1)
            .mount(&server)
            .await;

        client(&server).chat(&request(Some("json"))).await.unwrap();
    }

    #[tokio::test]
    async fn chat_fails_on_503_without_retrying() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(503))
            .up_to_n_times(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(ResponseTemplate::new(200).set_body_json(reply("second try")))
            .mount(&server)
            .await;

        let err = client(&server).chat(&request(None)).await.unwrap_err();
        assert!(matches!(err, CauserieError::Provider { .. }));
        assert!(err.to_string().contains("503"), "got: {err}");

        let requests = server.received_requests().await.unwrap();
        assert_eq!(requests.len(), 1);
    }

    #[tokio::test]
    async fn chat_reports_model_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/chat"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"error": "model \"falcon\" not found"})),
            )
            .expect(1)
            .mount(&server)
            .await;

        let err = client(&server).chat(&request(None)).await.unwrap_err();
        assert!(err.to_string().contains("not found"), "got: {err}");
    }

    #[tokio::test]
    async fn unreachable_server_is_a_provider_error() {
        let client = OllamaClient::new("http://127.0.0.1:9", Duration::from_secs(1)).unwrap();
        let err = client.tags().await.unwrap_err();
        assert!(matches!(err, CauserieError::Provider { .. }));
    }

    #[tokio::test]
    async fn trailing_slash_is_trimmed() {
        let client = OllamaClient::new("http://localhost:11434/", Duration::from_secs(1)).unwrap();
        assert_eq!(client.url("/api/tags"), "http://localhost:11434/api/tags");
    }
}
