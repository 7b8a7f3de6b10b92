// SPDX-FileCopyrightText: 2026 Causerie Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool-call extraction from free-form model output.
//!
//! The parser locates the first balanced `{...}` region (braces inside JSON
//! strings are ignored), parses only that region strictly, and maps it to a
//! [`ToolInvocation`]. Every failure is reported as a non-tool outcome, never
//! as an error.

use std::str::FromStr;

use serde_json::Value;

use crate::tools::{ToolInvocation, ToolKind};

/// Result of scanning a classification response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Extraction {
    /// A well-formed call to a known tool.
    Tool(ToolInvocation),
    /// No balanced brace region in the text.
    NoJson,
    /// A brace region was found but is not valid JSON.
    Malformed(String),
    /// Valid JSON that does not name a known tool with its parameter.
    Unrecognized(String),
}

/// Returns the first balanced brace-delimited region of `text`, if any.
///
/// Scanning starts at the first `{`. If that brace is never closed the text
/// has no region.
pub fn first_balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }
        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + ch.len_utf8();
                    return Some(&text[start..end]);
                }
            }
            _ => {}
        }
    }
    None
}

/// Extracts a tool call from raw model output.
pub fn extract_tool_call(raw: &str) -> Extraction {
    let Some(region) = first_balanced_object(raw) else {
        return Extraction::NoJson;
    };
    let value: Value = match serde_json::from_str(region) {
        Ok(v) => v,
        Err(e) => return Extraction::Malformed(e.to_string()),
    };
    invocation_from_value(&value)
}

fn invocation_from_value(value: &Value) -> Extraction {
    let Some(tag) = value.get("tool").and_then(Value::as_str) else {
        return Extraction::Unrecognized("missing `tool` field".to_string());
    };
    let Ok(kind) = ToolKind::from_str(tag) else {
        return Extraction::Unrecognized(format!("unknown tool `{tag}`"));
    };

    let field = match kind {
        ToolKind::Weather => "city",
        ToolKind::WebSearch => "query",
        ToolKind::Stock => "symbol",
    };
    let Some(arg) = value
        .get(field)
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
    else {
        return Extraction::Unrecognized(format!("`{tag}` call without `{field}`"));
    };

    let arg = arg.to_string();
    Extraction::Tool(match kind {
        ToolKind::Weather => ToolInvocation::Weather { city: arg },
        ToolKind::WebSearch => ToolInvocation::WebSearch { query: arg },
        ToolKind::Stock => ToolInvocation::Stock { symbol: arg },
    })
}
