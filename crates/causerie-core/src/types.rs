// SPDX-FileCopyrightText: 2026 Causerie Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Common types shared by the router, the model backend, and the lookup collaborators.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Unique identifier for a conversation session (one per connection).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub String);

impl SessionId {
    /// Generates a fresh random session identifier.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of adapter behind a trait object.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum AdapterType {
    Provider,
    Weather,
    Finance,
    Search,
}

/// Author of a conversation message.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single role-tagged message, as stored in history and sent to the model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Output format requested from the model.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display, Serialize, Deserialize)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    /// Free-form natural language.
    #[default]
    Text,
    /// Strictly structured JSON output.
    Json,
}

/// A chat-completion request to the model backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderRequest {
    /// Model identifier, e.g. `llama3.2`.
    pub model: String,
    /// Ordered conversation, system instructions first.
    pub messages: Vec<ChatMessage>,
    /// Requested output format.
    pub format: ResponseFormat,
}

/// A chat-completion response from the model backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderResponse {
    /// Generated assistant text.
    pub content: String,
    /// Model that produced the text.
    pub model: String,
}

/// An installed model as reported by the backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSummary {
    pub name: String,
    pub size: u64,
    pub modified_at: String,
}

/// Current conditions for a city.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    pub city: String,
    pub country: String,
    /// Degrees in the configured unit system.
    pub temperature: f64,
    pub feels_like: f64,
    /// Localised description, e.g. "ciel dégagé".
    pub description: String,
    /// Provider icon code, e.g. "01d".
    pub icon: String,
}

/// Real-time quote for a single ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockQuote {
    pub symbol: String,
    pub price: f64,
    pub change: f64,
    /// Percentage change formatted with two decimals, e.g. "1.25".
    pub change_percent: String,
    pub volume: u64,
    pub previous_close: f64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub last_updated: String,
    pub market_cap: u64,
    pub name: String,
}

/// One entry of the market overview.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketIndex {
    pub name: String,
    pub symbol: String,
    pub price: f64,
    pub change: f64,
    pub change_percent: String,
}

/// Snapshot of a few bellwether tickers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketOverview {
    pub indices: Vec<MarketIndex>,
    pub last_updated: String,
}

/// Chart-friendly price series.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ChartData {
    pub labels: Vec<String>,
    pub prices: Vec<f64>,
    pub volumes: Vec<u64>,
}

/// Hourly price history for a ticker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IntradaySeries {
    pub symbol: String,
    pub chart_data: ChartData,
    pub last_updated: String,
}

/// A ticker returned by a symbol search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SymbolMatch {
    pub symbol: String,
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn role_display_and_parse() {
        for role in [Role::System, Role::User, Role::Assistant] {
            let s = role.to_string();
            assert_eq!(Role::from_str(&s).unwrap(), role);
        }
        assert_eq!(Role::Assistant.to_string(), "assistant");
    }

    #[test]
    fn chat_message_serializes_lowercase_role() {
        let json = serde_json::to_value(ChatMessage::user("bonjour")).unwrap();
        assert_eq!(json["role"], "user");
        assert_eq!(json["content"], "bonjour");
    }

    #[test]
    fn stock_quote_uses_camel_case_fields() {
        let quote = StockQuote {
            symbol: "AAPL".into(),
            price: 190.5,
            change: 1.5,
            change_percent: "0.79".into(),
            volume: 0,
            previous_close: 189.0,
            open: 189.2,
            high: 191.0,
            low: 188.7,
            last_updated: "2026-10-18".into(),
            market_cap: 0,
            name: "AAPL".into(),
        };
        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["changePercent"], "0.79");
        assert_eq!(json["previousClose"], 189.0);
        assert!(json.get("change_percent").is_none());
    }

    #[test]
    fn symbol_match_renames_kind() {
        let m = SymbolMatch {
            symbol: "AAPL".into(),
            name: "APPLE INC".into(),
            kind: "Common Stock".into(),
        };
        let json = serde_json::to_value(&m).unwrap();
        assert_eq!(json["type"], "Common Stock");
    }

    #[test]
    fn session_ids_are_unique() {
        assert_ne!(SessionId::new(), SessionId::new());
    }

    #[test]
    fn response_format_defaults_to_text() {
        assert_eq!(ResponseFormat::default(), ResponseFormat::Text);
        assert_eq!(ResponseFormat::Json.to_string(), "json");
    }
}
