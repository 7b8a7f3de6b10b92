// SPDX-FileCopyrightText: 2026 Causerie Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Causerie assistant gateway.
//!
//! This crate provides the trait definitions, error types, and shared types
//! used throughout the workspace. The model backend and the lookup
//! collaborators implement traits defined here, so the conversation router
//! can receive them as injected dependencies.

pub mod error;
pub mod traits;
pub mod types;

pub use error::{CauserieError, LookupError, TURN_FAILED_MESSAGE};
pub use types::{
    AdapterType, ChatMessage, HealthStatus, ModelSummary, ProviderRequest, ProviderResponse,
    ResponseFormat, Role, SessionId,
};

pub use traits::{
    PluginAdapter, ProviderAdapter, StockLookup, WeatherLookup, WebSearch,
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adapter_type_round_trips_through_strings() {
        use std::str::FromStr;

        for variant in [
            AdapterType::Provider,
            AdapterType::Weather,
            AdapterType::Finance,
            AdapterType::Search,
        ] {
            let parsed = AdapterType::from_str(&variant.to_string()).expect("should parse back");
            assert_eq!(variant, parsed);
        }
    }

    #[test]
    fn all_traits_are_exported() {
        fn _assert_provider<T: ProviderAdapter>() {}
        fn _assert_weather<T: WeatherLookup>() {}
        fn _assert_stocks<T: StockLookup>() {}
        fn _assert_search<T: WebSearch>() {}
        fn _assert_plugin<T: PluginAdapter>() {}
    }

    #[test]
    fn health_status_variants() {
        assert_eq!(HealthStatus::Healthy, HealthStatus::Healthy);
        assert_ne!(HealthStatus::Degraded("slow".into()), HealthStatus::Healthy);
    }
}
