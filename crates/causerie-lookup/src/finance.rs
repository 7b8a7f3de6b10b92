// SPDX-FileCopyrightText: 2026 Causerie Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Finnhub stock market lookup.
//!
//! Quotes come from `/quote`, hourly history from `/stock/candle`, and ticker
//! search from `/search`. Finnhub answers unknown symbols with a zeroed
//! quote rather than an HTTP error.

use async_trait::async_trait;
use causerie_config::{FinanceConfig, OverviewSymbol};
use causerie_core::error::LookupError;
use causerie_core::traits::{PluginAdapter, StockLookup};
use causerie_core::types::{
    AdapterType, ChartData, HealthStatus, IntradaySeries, MarketIndex, MarketOverview,
    StockQuote, SymbolMatch,
};
use causerie_core::CauserieError;
use chrono::{DateTime, Duration, Utc};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

/// Number of hourly points kept for charts.
const INTRADAY_POINTS: usize = 24;

/// Number of ticker matches returned by a symbol search.
const SEARCH_LIMIT: usize = 5;

/// Stock collaborator backed by the Finnhub REST API.
pub struct Finnhub {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    overview_symbols: Vec<OverviewSymbol>,
}

#[derive(Debug, Deserialize)]
struct FinnhubQuote {
    c: Option<f64>,
    d: Option<f64>,
    dp: Option<f64>,
    pc: Option<f64>,
    o: Option<f64>,
    h: Option<f64>,
    l: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct FinnhubCandles {
    s: String,
    #[serde(default)]
    t: Vec<i64>,
    #[serde(default)]
    c: Vec<f64>,
    #[serde(default)]
    v: Vec<f64>,
}

#[derive(Debug, Deserialize)]
struct FinnhubSearch {
    #[serde(default)]
    result: Vec<FinnhubSymbol>,
}

#[derive(Debug, Deserialize)]
struct FinnhubSymbol {
    symbol: String,
    #[serde(default)]
    description: String,
    #[serde(rename = "type", default)]
    kind: String,
}

impl Finnhub {
    pub fn new(config: &FinanceConfig) -> Self {
        info!(base_url = %config.base_url, demo_key = config.api_key == "demo", "finance lookup initialized");
        Self {
            client: reqwest::Client::new(),
            api_key: config.api_key.clone(),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            overview_symbols: config.overview_symbols.clone(),
        }
    }

    async fn get<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, reqwest::Error> {
        self.client
            .get(format!("{}{endpoint}", self.base_url))
            .query(params)
            .query(&[("token", self.api_key.as_str())])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await
    }
}

fn quote_from_wire(symbol: &str, quote: FinnhubQuote) -> Option<StockQuote> {
    let price = quote.c.filter(|c| *c != 0.0)?;
    Some(StockQuote {
        symbol: symbol.to_string(),
        price,
        change: quote.d.unwrap_or_default(),
        change_percent: format!("{:.2}", quote.dp.unwrap_or_default()),
        volume: 0,
        previous_close: quote.pc.unwrap_or_default(),
        open: quote.o.unwrap_or_default(),
        high: quote.h.unwrap_or_default(),
        low: quote.l.unwrap_or_default(),
        last_updated: Utc::now().format("%Y-%m-%d").to_string(),
        market_cap: 0,
        name: symbol.to_string(),
    })
}

fn chart_from_candles(candles: FinnhubCandles) -> ChartData {
    let len = candles.t.len().min(candles.c.len());
    let start = len.saturating_sub(INTRADAY_POINTS);
    let mut chart = ChartData::default();
    for i in start..len {
        let label = DateTime::<Utc>::from_timestamp(candles.t[i], 0)
            .map(|t| t.format("%H:%M").to_string())
            .unwrap_or_default();
        chart.labels.push(label);
        chart.prices.push(candles.c[i]);
        chart
            .volumes
            .push(candles.v.get(i).copied().unwrap_or_default() as u64);
    }
    chart
}

#[async_trait]
impl PluginAdapter for Finnhub {
    fn name(&self) -> &str {
        "finnhub"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Finance
    }

    async fn health_check(&self) -> Result<HealthStatus, CauserieError> {
        if self.api_key == "demo" {
            return Ok(HealthStatus::Degraded("using the demo API key".into()));
        }
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl StockLookup for Finnhub {
    async fn quote(&self, symbol: &str) -> Result<StockQuote, LookupError> {
        let symbol = symbol.trim().to_uppercase();
        debug!(symbol = %symbol, "fetching stock quote");

        let wire: FinnhubQuote = self
            .get("/quote", &[("symbol", symbol.as_str())])
            .await
            .map_err(|e| {
                warn!(symbol = %symbol, error = %e, "quote request failed");
                LookupError::Upstream("Failed to fetch stock data.".into())
            })?;

        quote_from_wire(&symbol, wire).ok_or_else(|| {
            debug!(symbol = %symbol, "no quote data");
            LookupError::NotFound(format!("Stock symbol \"{symbol}\" not found."))
        })
    }

    async fn market_overview(&self) -> Result<MarketOverview, LookupError> {
        let quotes =
            futures::future::join_all(self.overview_symbols.iter().map(|s| self.quote(&s.symbol)))
                .await;

        let indices = self
            .overview_symbols
            .iter()
            .zip(quotes)
            .filter_map(|(entry, result)| match result {
                Ok(q) => Some(MarketIndex {
                    name: entry.name.clone(),
                    symbol: entry.symbol.clone(),
                    price: q.price,
                    change: q.change,
                    change_percent: q.change_percent,
                }),
                Err(e) => {
                    warn!(symbol = %entry.symbol, error = %e, "skipping overview entry");
                    None
                }
            })
            .collect();

        Ok(MarketOverview {
            indices,
            last_updated: Utc::now().to_rfc3339(),
        })
    }

    async fn intraday(&self, symbol: &str) -> Result<IntradaySeries, LookupError> {
        let symbol = symbol.trim().to_uppercase();
        let now = Utc::now();
        let from = (now - Duration::days(7)).timestamp().to_string();
        let to = now.timestamp().to_string();

        let candles: FinnhubCandles = self
            .get(
                "/stock/candle",
                &[
                    ("symbol", symbol.as_str()),
                    ("resolution", "60"),
                    ("from", from.as_str()),
                    ("to", to.as_str()),
                ],
            )
            .await
            .map_err(|e| {
                warn!(symbol = %symbol, error = %e, "candle request failed");
                LookupError::Upstream("Failed to fetch chart data.".into())
            })?;

        if candles.s != "ok" || candles.t.is_empty() {
            return Err(LookupError::NotFound("No chart data available.".into()));
        }

        Ok(IntradaySeries {
            symbol,
            chart_data: chart_from_candles(candles),
            last_updated: now.to_rfc3339(),
        })
    }

    async fn search_symbols(&self, keywords: &str) -> Result<Vec<SymbolMatch>, LookupError> {
        let found: FinnhubSearch = self
            .get("/search", &[("q", keywords)])
            .await
            .map_err(|e| {
                warn!(keywords, error = %e, "symbol search failed");
                LookupError::Upstream("Search failed.".into())
            })?;

        Ok(found
            .result
            .into_iter()
            .take(SEARCH_LIMIT)
            .map(|m| SymbolMatch {
                symbol: m.symbol,
                name: m.description,
                kind: m.kind,
            })
            .collect())
    }
}
