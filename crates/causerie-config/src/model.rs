// SPDX-FileCopyrightText: 2026 Causerie Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Configuration model structs.
//!
//! All structs use `#[serde(deny_unknown_fields)]` so a misspelled key is
//! reported at startup instead of silently ignored.

use serde::{Deserialize, Serialize};

/// Top-level Causerie configuration.
///
/// Every section is optional and falls back to defaults matching a local
/// single-machine deployment (Ollama on localhost, public SearXNG instance).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct CauserieConfig {
    /// HTTP/WebSocket server settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Ollama model backend settings.
    #[serde(default)]
    pub ollama: OllamaConfig,

    /// Conversation router feature toggles.
    #[serde(default)]
    pub router: RouterConfig,

    /// OpenWeatherMap settings.
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Finnhub settings.
    #[serde(default)]
    pub finance: FinanceConfig,

    /// SearXNG settings.
    #[serde(default)]
    pub search: SearchConfig,
}

/// HTTP/WebSocket server configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    /// Address to bind.
    #[serde(default = "default_host")]
    pub host: String,

    /// Port to bind.
    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory served as static files (chat UI).
    #[serde(default = "default_static_dir")]
    pub static_dir: String,

    /// Logging level (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: default_static_dir(),
            log_level: default_log_level(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_static_dir() -> String {
    "public".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

/// Ollama backend configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OllamaConfig {
    /// Base URL of the Ollama HTTP API.
    #[serde(default = "default_ollama_url")]
    pub base_url: String,

    /// Model assigned to new sessions.
    #[serde(default = "default_model")]
    pub default_model: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Models users may switch to.
    #[serde(default = "default_available_models")]
    pub available_models: Vec<String>,
}

impl Default for OllamaConfig {
    fn default() -> Self {
        Self {
            base_url: default_ollama_url(),
            default_model: default_model(),
            request_timeout_secs: default_request_timeout_secs(),
            available_models: default_available_models(),
        }
    }
}

fn default_ollama_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "llama3.2".to_string()
}

fn default_request_timeout_secs() -> u64 {
    300
}

fn default_available_models() -> Vec<String> {
    ["llama3.2", "falcon", "mistral", "codellama", "phi", "neural-chat"]
        .iter()
        .map(|m| m.to_string())
        .collect()
}

/// Conversation router toggles.
///
/// Weather lookups are always offered and have no switch.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RouterConfig {
    /// Offer the `web_search` tool to new sessions.
    #[serde(default)]
    pub web_search_enabled: bool,

    /// Offer the `get_stock` tool to new sessions.
    #[serde(default)]
    pub finance_enabled: bool,

    /// Longest accepted user message, in characters.
    #[serde(default = "default_max_message_length")]
    pub max_message_length: usize,
}

impl Default for RouterConfig {
    fn default() -> Self {
        Self {
            web_search_enabled: false,
            finance_enabled: false,
            max_message_length: default_max_message_length(),
        }
    }
}

fn default_max_message_length() -> usize {
    4000
}

/// OpenWeatherMap configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct WeatherConfig {
    /// API key. Required by `serve`; may come from `OPENWEATHER_API_KEY`.
    #[serde(default)]
    pub api_key: Option<String>,

    /// Current-weather endpoint.
    #[serde(default = "default_weather_url")]
    pub base_url: String,

    /// Unit system (`metric`, `imperial`, `standard`).
    #[serde(default = "default_units")]
    pub units: String,

    /// Language for descriptions.
    #[serde(default = "default_lang")]
    pub lang: String,
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: default_weather_url(),
            units: default_units(),
            lang: default_lang(),
        }
    }
}

fn default_weather_url() -> String {
    "https://api.openweathermap.org/data/2.5/weather".to_string()
}

fn default_units() -> String {
    "metric".to_string()
}

fn default_lang() -> String {
    "fr".to_string()
}

/// Finnhub configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct FinanceConfig {
    /// API key; may come from `FINNHUB_API_KEY`.
    #[serde(default = "default_finance_key")]
    pub api_key: String,

    /// API root.
    #[serde(default = "default_finance_url")]
    pub base_url: String,

    /// Tickers shown in the market overview.
    #[serde(default = "default_overview_symbols")]
    pub overview_symbols: Vec<OverviewSymbol>,
}

impl Default for FinanceConfig {
    fn default() -> Self {
        Self {
            api_key: default_finance_key(),
            base_url: default_finance_url(),
            overview_symbols: default_overview_symbols(),
        }
    }
}

/// A ticker with its display name.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct OverviewSymbol {
    pub symbol: String,
    pub name: String,
}

fn default_finance_key() -> String {
    "demo".to_string()
}

fn default_finance_url() -> String {
    "https://finnhub.io/api/v1".to_string()
}

fn default_overview_symbols() -> Vec<OverviewSymbol> {
    [("AAPL", "Apple"), ("GOOGL", "Google"), ("MSFT", "Microsoft")]
        .iter()
        .map(|(symbol, name)| OverviewSymbol {
            symbol: symbol.to_string(),
            name: name.to_string(),
        })
        .collect()
}

/// SearXNG configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct SearchConfig {
    /// Search endpoint of the SearXNG instance.
    #[serde(default = "default_search_url")]
    pub base_url: String,

    /// Comma-separated upstream engines.
    #[serde(default = "default_engines")]
    pub engines: String,

    /// Number of hits passed to the model.
    #[serde(default = "default_max_results")]
    pub max_results: usize,

    /// Snippet length before truncation, in characters.
    #[serde(default = "default_snippet_chars")]
    pub snippet_chars: usize,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: default_search_url(),
            engines: default_engines(),
            max_results: default_max_results(),
            snippet_chars: default_snippet_chars(),
        }
    }
}

fn default_search_url() -> String {
    "https://searx.be/search".to_string()
}

fn default_engines() -> String {
    "google,bing".to_string()
}

fn default_max_results() -> usize {
    5
}

fn default_snippet_chars() -> usize {
    200
}
