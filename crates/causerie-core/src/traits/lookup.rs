// SPDX-FileCopyrightText: 2026 Causerie Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lookup collaborator traits: weather, stock quotes, and web search.
//!
//! Implementations hold no per-session state and are shared process-wide
//! behind `Arc<dyn ...>`.

use async_trait::async_trait;

use crate::error::LookupError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{IntradaySeries, MarketOverview, StockQuote, SymbolMatch, WeatherReport};

/// Current-conditions weather provider.
#[async_trait]
pub trait WeatherLookup: PluginAdapter {
    /// Fetches current weather for `city`.
    async fn current_weather(&self, city: &str) -> Result<WeatherReport, LookupError>;
}

/// Stock market data provider.
#[async_trait]
pub trait StockLookup: PluginAdapter {
    /// Fetches a real-time quote for `symbol` (case-insensitive).
    async fn quote(&self, symbol: &str) -> Result<StockQuote, LookupError>;

    /// Fetches quotes for the configured bellwether tickers.
    async fn market_overview(&self) -> Result<MarketOverview, LookupError>;

    /// Fetches the last day of hourly prices for `symbol`.
    async fn intraday(&self, symbol: &str) -> Result<IntradaySeries, LookupError>;

    /// Searches tickers matching `keywords`.
    async fn search_symbols(&self, keywords: &str) -> Result<Vec<SymbolMatch>, LookupError>;
}

/// Web search provider.
#[async_trait]
pub trait WebSearch: PluginAdapter {
    /// Runs `query` and returns results pre-formatted for a language model.
    ///
    /// Never fails: upstream errors are folded into the returned text.
    async fn search(&self, query: &str) -> String;
}
