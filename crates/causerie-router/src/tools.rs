// SPDX-FileCopyrightText: 2026 Causerie Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool catalogue, per-session enablement, and parsed tool invocations.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString, IntoStaticStr};

/// The lookup tools the model may request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, IntoStaticStr)]
pub enum ToolKind {
    #[strum(serialize = "get_weather")]
    Weather,
    #[strum(serialize = "web_search")]
    WebSearch,
    #[strum(serialize = "get_stock")]
    Stock,
}

/// Which optional tools a session offers. Weather is always offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ToolToggles {
    pub web_search_enabled: bool,
    pub finance_enabled: bool,
}

impl ToolToggles {
    pub fn new(web_search_enabled: bool, finance_enabled: bool) -> Self {
        Self {
            web_search_enabled,
            finance_enabled,
        }
    }

    /// True if the model is allowed to invoke `kind` under these toggles.
    pub fn allows(&self, kind: ToolKind) -> bool {
        match kind {
            ToolKind::Weather => true,
            ToolKind::WebSearch => self.web_search_enabled,
            ToolKind::Stock => self.finance_enabled,
        }
    }

    /// Tools offered to the model, in prompt order.
    pub fn enabled(&self) -> Vec<ToolKind> {
        [ToolKind::Weather, ToolKind::WebSearch, ToolKind::Stock]
            .into_iter()
            .filter(|kind| self.allows(*kind))
            .collect()
    }
}

/// Per-turn overrides for the session toggles. `None` keeps the current value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TurnOptions {
    pub web_search_enabled: Option<bool>,
    pub finance_enabled: Option<bool>,
}

impl TurnOptions {
    pub fn apply_to(&self, toggles: &mut ToolToggles) {
        if let Some(enabled) = self.web_search_enabled {
            toggles.web_search_enabled = enabled;
        }
        if let Some(enabled) = self.finance_enabled {
            toggles.finance_enabled = enabled;
        }
    }
}

/// A validated tool call extracted from model output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ToolInvocation {
    Weather { city: String },
    WebSearch { query: String },
    Stock { symbol: String },
}

impl ToolInvocation {
    pub fn kind(&self) -> ToolKind {
        match self {
            ToolInvocation::Weather { .. } => ToolKind::Weather,
            ToolInvocation::WebSearch { .. } => ToolKind::WebSearch,
            ToolInvocation::Stock { .. } => ToolKind::Stock,
        }
    }

    /// The single parameter carried by the call.
    pub fn argument(&self) -> &str {
        match self {
            ToolInvocation::Weather { city } => city,
            ToolInvocation::WebSearch { query } => query,
            ToolInvocation::Stock { symbol } => symbol,
        }
    }
}
