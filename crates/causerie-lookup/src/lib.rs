// SPDX-FileCopyrightText: 2026 Causerie Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Lookup collaborators for the Causerie assistant gateway.
//!
//! Each collaborator is stateless and shared process-wide:
//! - [`OpenWeatherMap`] for current weather
//! - [`Finnhub`] for stock quotes, market overview, and charts
//! - [`SearxSearch`] for web search

pub mod finance;
pub mod search;
pub mod weather;

pub use finance::Finnhub;
pub use search::SearxSearch;
pub use weather::OpenWeatherMap;
