// SPDX-FileCopyrightText: 2026 Causerie Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Final answer of a turn.

use causerie_core::types::{StockQuote, WeatherReport};
use serde::Serialize;

/// Either plain text, or text plus the structured lookup payload.
///
/// Serializes as a bare JSON string or as `{"type": ..., "text": ..., "data": ...}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Answer {
    Text(String),
    Tool(ToolAnswer),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ToolAnswer {
    Weather { text: String, data: WeatherReport },
    Finance { text: String, data: StockQuote },
}

impl Answer {
    /// The natural-language reply, whatever the shape.
    pub fn text(&self) -> &str {
        match self {
            Answer::Text(text)
            | Answer::Tool(ToolAnswer::Weather { text, .. })
            | Answer::Tool(ToolAnswer::Finance { text, .. }) => text,
        }
    }

    pub fn is_plain(&self) -> bool {
        matches!(self, Answer::Text(_))
    }
}
