// SPDX-FileCopyrightText: 2026 Causerie Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lookup collaborator doubles with fixed outcomes and call recording.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;

use causerie_core::traits::{PluginAdapter, StockLookup, WeatherLookup, WebSearch};
use causerie_core::types::{
    AdapterType, ChartData, HealthStatus, IntradaySeries, MarketIndex, MarketOverview,
    StockQuote, SymbolMatch, WeatherReport,
};
use causerie_core::{CauserieError, LookupError};

macro_rules! mock_adapter {
    ($ty:ty, $name:literal, $kind:expr) => {
        #[async_trait]
        impl PluginAdapter for $ty {
            fn name(&self) -> &str {
                $name
            }

            fn version(&self) -> semver::Version {
                semver::Version::new(0, 1, 0)
            }

            fn adapter_type(&self) -> AdapterType {
                $kind
            }

            async fn health_check(&self) -> Result<HealthStatus, CauserieError> {
                Ok(HealthStatus::Healthy)
            }
        }
    };
}

/// A plausible report for `city`: 19.5°C, clear sky.
pub fn sample_weather(city: &str) -> WeatherReport {
    WeatherReport {
        city: city.to_string(),
        country: "FR".to_string(),
        temperature: 19.5,
        feels_like: 18.9,
        description: "ciel dégagé".to_string(),
        icon: "01d".to_string(),
    }
}

/// A plausible quote for `symbol`.
pub fn sample_quote(symbol: &str) -> StockQuote {
    let symbol = symbol.to_uppercase();
    StockQuote {
        symbol: symbol.clone(),
        price: 190.5,
        change: 1.5,
        change_percent: "0.79".to_string(),
        volume: 0,
        previous_close: 189.0,
        open: 189.2,
        high: 191.0,
        low: 188.7,
        last_updated: "2026-10-18".to_string(),
        market_cap: 0,
        name: symbol,
    }
}

/// Weather double returning the same outcome for every city.
#[derive(Clone)]
pub struct MockWeather {
    outcome: Result<Option<WeatherReport>, LookupError>,
    cities: Arc<Mutex<Vec<String>>>,
}

impl MockWeather {
    /// Succeeds with [`sample_weather`] for whatever city is asked.
    pub fn new() -> Self {
        Self {
            outcome: Ok(None),
            cities: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Succeeds with exactly `report`.
    pub fn returning(report: WeatherReport) -> Self {
        Self {
            outcome: Ok(Some(report)),
            ..Self::new()
        }
    }

    /// Fails every lookup with `error`.
    pub fn failing(error: LookupError) -> Self {
        Self {
            outcome: Err(error),
            ..Self::new()
        }
    }

    /// Cities requested so far.
    pub async fn cities(&self) -> Vec<String> {
        self.cities.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.cities.lock().await.len()
    }
}

impl Default for MockWeather {
    fn default() -> Self {
        Self::new()
    }
}

mock_adapter!(MockWeather, "mock-weather", AdapterType::Weather);

#[async_trait]
impl WeatherLookup for MockWeather {
    async fn current_weather(&self, city: &str) -> Result<WeatherReport, LookupError> {
        self.cities.lock().await.push(city.to_string());
        match &self.outcome {
            Ok(Some(report)) => Ok(report.clone()),
            Ok(None) => Ok(sample_weather(city)),
            Err(e) => Err(e.clone()),
        }
    }
}

/// Finance double. Quotes come from [`sample_quote`] unless a failure is set.
#[derive(Clone)]
pub struct MockStocks {
    failure: Option<LookupError>,
    symbols: Arc<Mutex<Vec<String>>>,
}

impl MockStocks {
    pub fn new() -> Self {
        Self {
            failure: None,
            symbols: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Fails every operation with `error`.
    pub fn failing(error: LookupError) -> Self {
        Self {
            failure: Some(error),
            ..Self::new()
        }
    }

    /// Symbols passed to `quote` or `intraday` so far.
    pub async fn symbols(&self) -> Vec<String> {
        self.symbols.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.symbols.lock().await.len()
    }

    fn check(&self) -> Result<(), LookupError> {
        match &self.failure {
            Some(e) => Err(e.clone()),
            None => Ok(()),
        }
    }
}

impl Default for MockStocks {
    fn default() -> Self {
        Self::new()
    }
}

mock_adapter!(MockStocks, "mock-stocks", AdapterType::Finance);

#[async_trait]
impl StockLookup for MockStocks {
    async fn quote(&self, symbol: &str) -> Result<StockQuote, LookupError> {
        self.symbols.lock().await.push(symbol.to_string());
        self.check()?;
        Ok(sample_quote(symbol))
    }

    async fn market_overview(&self) -> Result<MarketOverview, LookupError> {
        self.check()?;
        let indices = [("AAPL", "Apple"), ("MSFT", "Microsoft")]
            .into_iter()
            .map(|(symbol, name)| {
                let q = sample_quote(symbol);
                MarketIndex {
                    name: name.to_string(),
                    symbol: q.symbol,
                    price: q.price,
                    change: q.change,
                    change_percent: q.change_percent,
                }
            })
            .collect();
        Ok(MarketOverview {
            indices,
            last_updated: chrono::Utc::now().to_rfc3339(),
        })
    }

    async fn intraday(&self, symbol: &str) -> Result<IntradaySeries, LookupError> {
        self.symbols.lock().await.push(symbol.to_string());
        self.check()?;
        Ok(IntradaySeries {
            symbol: symbol.to_uppercase(),
            chart_data: ChartData {
                labels: vec!["09:00".into(), "10:00".into()],
                prices: vec![189.4, 190.5],
                volumes: vec![1200, 900],
            },
            last_updated: chrono::Utc::now().to_rfc3339(),
        })
    }

    async fn search_symbols(&self, keywords: &str) -> Result<Vec<SymbolMatch>, LookupError> {
        self.check()?;
        Ok(vec![SymbolMatch {
            symbol: keywords.to_uppercase(),
            name: format!("{} INC", keywords.to_uppercase()),
            kind: "Common Stock".to_string(),
        }])
    }
}

/// Web search double returning fixed text.
#[derive(Clone)]
pub struct MockSearch {
    text: String,
    queries: Arc<Mutex<Vec<String>>>,
}

impl MockSearch {
    pub fn new() -> Self {
        Self::returning("Résultats de recherche: rien de notable.")
    }

    pub fn returning(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            queries: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Queries received so far.
    pub async fn queries(&self) -> Vec<String> {
        self.queries.lock().await.clone()
    }

    pub async fn call_count(&self) -> usize {
        self.queries.lock().await.len()
    }
}

impl Default for MockSearch {
    fn default() -> Self {
        Self::new()
    }
}

mock_adapter!(MockSearch, "mock-search", AdapterType::Search);

#[async_trait]
impl WebSearch for MockSearch {
    async fn search(&self, query: &str) -> String {
        self.queries.lock().await.push(query.to_string());
        self.text.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn weather_records_cities() {
        let weather = MockWeather::new();
        let report = weather.current_weather("Lyon").await.unwrap();
        assert_eq!(report.city, "Lyon");
        assert_eq!(weather.cities().await, vec!["Lyon"]);
    }

    #[tokio::test]
    async fn failing_weather_returns_error() {
        let weather = MockWeather::failing(LookupError::NotFound("city not found".into()));
        let err = weather.current_weather("Atlantis").await.unwrap_err();
        assert_eq!(err.message(), "city not found");
        assert_eq!(weather.call_count().await, 1);
    }

    #[tokio::test]
    async fn stocks_uppercase_symbol() {
        let stocks = MockStocks::new();
        assert_eq!(stocks.quote("aapl").await.unwrap().symbol, "AAPL");
        assert_eq!(stocks.call_count().await, 1);
    }

    #[tokio::test]
    async fn search_returns_fixed_text() {
        let search = MockSearch::returning("hello");
        assert_eq!(search.search("rust").await, "hello");
        assert_eq!(search.queries().await, vec!["rust"]);
    }
}
