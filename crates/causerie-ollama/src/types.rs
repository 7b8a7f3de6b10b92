// SPDX-FileCopyrightText: 2026 Causerie Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Ollama HTTP API wire types.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/chat`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<WireMessage>,
    pub stream: bool,
    /// `"json"` constrains the model to emit a JSON value.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WireMessage {
    pub role: String,
    pub content: String,
}

/// Non-streaming reply of `POST /api/chat`.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatResponse {
    pub model: String,
    pub message: WireMessage,
    #[serde(default)]
    pub done: bool,
}

/// Reply of `GET /api/tags`.
#[derive(Debug, Clone, Deserialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub models: Vec<TagEntry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TagEntry {
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default)]
    pub modified_at: String,
}

/// Body of `POST /api/show`.
#[derive(Debug, Clone, Serialize)]
pub struct ShowRequest {
    pub model: String,
}

/// Reply of `GET /api/version`.
#[derive(Debug, Clone, Deserialize)]
pub struct VersionResponse {
    pub version: String,
}

/// Error body returned by Ollama on failure.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorResponse {
    pub error: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_is_omitted_for_text() {
        let req = ChatRequest {
            model: "llama3.2".into(),
            messages: vec![],
            stream: false,
            format: None,
        };
        let json = serde_json::to_value(&req).unwrap();
        assert!(json.get("format").is_none());
        assert_eq!(json["stream"], false);
    }

    #[test]
    fn tags_tolerate_extra_fields() {
        let body = r#"{"models":[{"name":"llama3.2:latest","model":"llama3.2:latest","size":2019393189,"digest":"a80c","modified_at":"2026-01-01T00:00:00Z","details":{"family":"llama"}}]}"#;
        let tags: TagsResponse = serde_json::from_str(body).unwrap();
        assert_eq!(tags.models[0].name, "llama3.2:latest");
        assert_eq!(tags.models[0].size, 2_019_393_189);
    }
}
