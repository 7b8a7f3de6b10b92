// SPDX-FileCopyrightText: 2026 Causerie Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Keyword pre-filter selecting the output mode of the classification call.
//!
//! A match only asks the model for JSON output. It never dispatches a tool and
//! never prevents the model from emitting a tool call on its own.

use causerie_core::types::ResponseFormat;

use crate::tools::{ToolKind, ToolToggles};

/// Weather terms (contains, lowercase).
const WEATHER_KEYWORDS: &[&str] = &["météo", "meteo", "temps", "temperature", "weather"];

/// Search terms, consulted only when web search is enabled.
const SEARCH_KEYWORDS: &[&str] = &[
    "news", "nouvelles", "actualités", "dernières", "récent", "aujourd'hui",
    "current", "latest", "recent", "last", "cherche", "search", "web",
    "what is", "define", "explain", "tell me", "mise à jour", "information",
];

/// Finance terms, consulted only when finance is enabled.
const FINANCE_KEYWORDS: &[&str] = &[
    "action", "stock", "bourse", "marché", "finance", "cours", "prix",
    "nasdaq", "sp500", "dow", "trading", "investissement", "portfolio",
];

/// Outcome of the keyword scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordHint {
    /// Output mode to request from the classification call.
    pub format: ResponseFormat,
    /// First tool family whose keywords matched, if any.
    pub matched: Option<ToolKind>,
}

/// Stateless keyword scanner.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordFilter;

impl KeywordFilter {
    pub fn new() -> Self {
        Self
    }

    /// Scans `message` against the keyword sets of the enabled tools.
    pub fn hint(&self, message: &str, toggles: &ToolToggles) -> KeywordHint {
        let lower = message.to_lowercase();
        let matched = [
            (ToolKind::Weather, WEATHER_KEYWORDS),
            (ToolKind::WebSearch, SEARCH_KEYWORDS),
            (ToolKind::Stock, FINANCE_KEYWORDS),
        ]
        .into_iter()
        .filter(|(kind, _)| toggles.allows(*kind))
        .find(|(_, words)| words.iter().any(|w| lower.contains(w)))
        .map(|(kind, _)| kind);

        KeywordHint {
            format: if matched.is_some() {
                ResponseFormat::Json
            } else {
                ResponseFormat::Text
            },
            matched,
        }
    }
}
