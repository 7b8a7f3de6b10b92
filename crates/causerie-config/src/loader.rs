// SPDX-FileCopyrightText: 2026 Causerie Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Layered configuration loading with Figment.
//!
//! Lookup order: `/etc/causerie/causerie.toml` < `~/.config/causerie/causerie.toml`
//! < `./causerie.toml` < environment variables.

#![allow(clippy::result_large_err)] // figment::Error is external

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};

use crate::model::CauserieConfig;

/// Sections addressable through `CAUSERIE_<SECTION>_<KEY>` variables.
const SECTIONS: &[&str] = &["server", "ollama", "router", "weather", "finance", "search"];

/// Provider-conventional variables and the keys they populate.
const CONVENTIONAL_VARS: &[(&str, &str)] = &[
    ("OPENWEATHER_API_KEY", "weather.api_key"),
    ("FINNHUB_API_KEY", "finance.api_key"),
];

pub(crate) const SYSTEM_CONFIG: &str = "/etc/causerie/causerie.toml";
pub(crate) const LOCAL_CONFIG: &str = "causerie.toml";

pub(crate) fn user_config_path() -> PathBuf {
    dirs::config_dir()
        .map(|d| d.join("causerie/causerie.toml"))
        .unwrap_or_default()
}

/// Load configuration from the file hierarchy with env var overrides.
///
/// Merge order (later overrides earlier):
/// 1. Compiled defaults
/// 2. `/etc/causerie/causerie.toml`
/// 3. `~/.config/causerie/causerie.toml`
/// 4. `./causerie.toml`
/// 5. `OPENWEATHER_API_KEY`, `FINNHUB_API_KEY`
/// 6. `CAUSERIE_*`
pub fn load_config() -> Result<CauserieConfig, figment::Error> {
    build_figment().extract()
}

/// Load configuration from a TOML string on top of the defaults only.
pub fn load_config_from_str(toml_content: &str) -> Result<CauserieConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CauserieConfig::default()))
        .merge(Toml::string(toml_content))
        .extract()
}

/// Load configuration from an explicit file with env var overrides.
pub fn load_config_from_path(path: &Path) -> Result<CauserieConfig, figment::Error> {
    Figment::new()
        .merge(Serialized::defaults(CauserieConfig::default()))
        .merge(Toml::file(path))
        .merge(conventional_env_provider())
        .merge(env_provider())
        .extract()
}

/// The full Figment before extraction.
pub fn build_figment() -> Figment {
    Figment::new()
        .merge(Serialized::defaults(CauserieConfig::default()))
        .merge(Toml::file(SYSTEM_CONFIG))
        .merge(Toml::file(user_config_path()))
        .merge(Toml::file(LOCAL_CONFIG))
        .merge(conventional_env_provider())
        .merge(env_provider())
}

/// Maps `CAUSERIE_<SECTION>_<KEY>` onto `<section>.<key>`.
///
/// Only the leading section name is split off, so keys containing
/// underscores (`CAUSERIE_ROUTER_WEB_SEARCH_ENABLED`) stay intact.
fn env_provider() -> Env {
    Env::prefixed("CAUSERIE_").map(|key| section_key(key.as_str()).into())
}

fn conventional_env_provider() -> Env {
    Env::raw()
        .only(&["OPENWEATHER_API_KEY", "FINNHUB_API_KEY"])
        .map(|key| {
            CONVENTIONAL_VARS
                .iter()
                .find(|(var, _)| key.as_str().eq_ignore_ascii_case(var))
                .map(|(_, target)| (*target).into())
                .unwrap_or_else(|| key.as_str().to_string().into())
        })
}

fn section_key(key: &str) -> String {
    let lowered = key.to_ascii_lowercase();
    for section in SECTIONS {
        if let Some(rest) = lowered
            .strip_prefix(section)
            .and_then(|r| r.strip_prefix('_'))
        {
            return format!("{section}.{rest}");
        }
    }
    lowered
}
