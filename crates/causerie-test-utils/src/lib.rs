// SPDX-FileCopyrightText: 2026 Causerie Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test doubles for Causerie.
//!
//! - [`MockProvider`] - scripted model backend that records requests
//! - [`MockWeather`], [`MockStocks`], [`MockSearch`] - lookup collaborators
//!   with fixed outcomes and call counters

pub mod mock_lookup;
pub mod mock_provider;

pub use mock_lookup::{MockSearch, MockStocks, MockWeather, sample_quote, sample_weather};
pub use mock_provider::MockProvider;
