// SPDX-FileCopyrightText: 2026 Causerie Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SearXNG web search, formatted as plain text for a language model.

use std::fmt::Write as _;
use std::sync::LazyLock;

use async_trait::async_trait;
use causerie_config::SearchConfig;
use causerie_core::traits::{PluginAdapter, WebSearch};
use causerie_core::types::{AdapterType, HealthStatus};
use causerie_core::CauserieError;
use regex::Regex;
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Public SearXNG instances reject requests without a browser-like agent.
const USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
                          (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

static HTML_TAG: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]*>").unwrap());

/// Web search collaborator backed by a SearXNG instance's JSON API.
pub struct SearxSearch {
    client: reqwest::Client,
    base_url: String,
    engines: String,
    max_results: usize,
    snippet_chars: usize,
}

#[derive(Debug, Default, Deserialize)]
pub struct SearxResponse {
    #[serde(default)]
    pub results: Vec<SearxResult>,
}

#[derive(Debug, Deserialize)]
pub struct SearxResult {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

impl SearxSearch {
    pub fn new(config: &SearchConfig) -> Self {
        info!(base_url = %config.base_url, engines = %config.engines, "web search initialized");
        Self {
            client: reqwest::Client::new(),
            base_url: config.base_url.clone(),
            engines: config.engines.clone(),
            max_results: config.max_results,
            snippet_chars: config.snippet_chars,
        }
    }

    async fn fetch(&self, query: &str) -> Result<SearxResponse, String> {
        let response = self
            .client
            .get(&self.base_url)
            .header(reqwest::header::USER_AGENT, USER_AGENT)
            .query(&[
                ("q", query),
                ("format", "json"),
                ("engines", self.engines.as_str()),
                ("safesearch", "1"),
            ])
            .send()
            .await
            .map_err(|e| e.to_string())?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!(
                "HTTP {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or_default()
            ));
        }
        response.json().await.map_err(|e| e.to_string())
    }

    /// Renders results as a numbered list followed by a result count.
    pub fn format_results(&self, data: &SearxResponse, query: &str) -> String {
        if data.results.is_empty() {
            return format!(
                "Aucun résultat trouvé pour \"{query}\". Essayez avec des mots-clés différents."
            );
        }

        let mut out = format!("Résultats de recherche pour \"{query}\":\n\n");
        for (index, result) in data.results.iter().take(self.max_results).enumerate() {
            let _ = writeln!(out, "{}. **{}**", index + 1, result.title);
            if let Some(content) = result.content.as_deref().filter(|c| !c.is_empty()) {
                let _ = writeln!(out, "   {}", self.clean_snippet(content));
            }
            if let Some(url) = result.url.as_deref().filter(|u| !u.is_empty()) {
                let _ = writeln!(out, "   Source: {url}");
            }
            out.push('\n');
        }
        let _ = write!(out, "\nBasé sur {} résultats trouvés.", data.results.len());
        out
    }

    fn clean_snippet(&self, content: &str) -> String {
        let stripped = HTML_TAG.replace_all(content, "");
        let stripped = stripped.trim();
        if stripped.chars().count() > self.snippet_chars {
            let truncated: String = stripped.chars().take(self.snippet_chars).collect();
            format!("{truncated}...")
        } else {
            stripped.to_string()
        }
    }
}

#[async_trait]
impl PluginAdapter for SearxSearch {
    fn name(&self) -> &str {
        "searxng"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Search
    }

    async fn health_check(&self) -> Result<HealthStatus, CauserieError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl WebSearch for SearxSearch {
    async fn search(&self, query: &str) -> String {
        debug!(query = %query, "performing web search");
        match self.fetch(query).await {
            Ok(data) => {
                debug!(query = %query, hits = data.results.len(), "search results received");
                self.format_results(&data, query)
            }
            Err(msg) => {
                warn!(query = %query, error = %msg, "web search failed");
                format!("Error performing web search: {msg}")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header_exists, method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn searx(base_url: String) -> SearxSearch {
        SearxSearch::new(&SearchConfig {
            base_url,
            ..SearchConfig::default()
        })
    }

    fn hit(title: &str, content: &str, url: &str) -> SearxResult {
        SearxResult {
            title: title.into(),
            content: Some(content.into()),
            url: Some(url.into()),
        }
    }

    #[test]
    fn formats_numbered_results() {
        let s = searx("http://unused".into());
        let data = SearxResponse {
            results: vec![
                hit("Rust", "<b>Rust</b> est un langage", "https://rust-lang.org"),
                hit("Tokio", "Runtime async", "https://tokio.rs"),
            ],
        };
        let text = s.format_results(&data, "rust");
        assert!(text.starts_with("Résultats de recherche pour \"rust\":\n\n"));
        assert!(text.contains("1. **Rust**\n   Rust est un langage\n   Source: https://rust-lang.org\n"));
        assert!(text.contains("2. **Tokio**"));
        assert!(text.ends_with("\nBasé sur 2 résultats trouvés."));
    }

    #[test]
    fn truncates_long_snippets_and_limits_results() {
        let s = searx("http://unused".into());
        let long = "é".repeat(250);
        let data = SearxResponse {
            results: (0..8).map(|i| hit(&format!("t{i}"), &long, "u")).collect(),
        };
        let text = s.format_results(&data, "q");
        assert!(text.contains(&format!("   {}...\n", "é".repeat(200))));
        assert!(text.contains("5. **t4**"));
        assert!(!text.contains("6. **t5**"));
        assert!(text.ends_with("Basé sur 8 résultats trouvés."));
    }

    #[test]
    fn empty_results_message() {
        let s = searx("http://unused".into());
        assert_eq!(
            s.format_results(&SearxResponse::default(), "xyzzy"),
            "Aucun résultat trouvé pour \"xyzzy\". Essayez avec des mots-clés différents."
        );
    }

    #[tokio::test]
    async fn search_sends_expected_parameters() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("q", "actualités rust"))
            .and(query_param("format", "json"))
            .and(query_param("engines", "google,bing"))
            .and(query_param("safesearch", "1"))
            .and(header_exists("user-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "query": "actualités rust",
                "results": [{"title": "Rust 2024", "content": "Sortie", "url": "https://blog.rust-lang.org", "engine": "bing"}]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let text = searx(format!("{}/search", server.uri()))
            .search("actualités rust")
            .await;
        assert!(text.contains("1. **Rust 2024**"));
    }

    #[tokio::test]
    async fn failures_are_folded_into_text() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429))
            .mount(&server)
            .await;

        let text = searx(server.uri()).search("rust").await;
        assert_eq!(text, "Error performing web search: HTTP 429: Too Many Requests");
    }
}
