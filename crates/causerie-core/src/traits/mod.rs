// SPDX-FileCopyrightText: 2026 Causerie Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Adapter trait definitions.
//!
//! Every adapter extends the [`PluginAdapter`] base trait and uses
//! `#[async_trait]` so it can be held as `Arc<dyn ...>` and swapped for a
//! test double.

pub mod adapter;
pub mod lookup;
pub mod provider;

pub use adapter::PluginAdapter;
pub use lookup::{StockLookup, WeatherLookup, WebSearch};
pub use provider::ProviderAdapter;
