// SPDX-FileCopyrightText: 2026 Causerie Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Semantic checks run after deserialization.
//!
//! Every rule is evaluated so a single run reports all problems at once.

use crate::diagnostic::ConfigError;
use crate::model::CauserieConfig;

/// Validate a deserialized configuration.
pub fn validate_config(config: &CauserieConfig) -> Result<(), Vec<ConfigError>> {
    let mut errors = Vec::new();

    if config.server.port == 0 {
        errors.push(ConfigError::Validation {
            message: "server.port must be non-zero".to_string(),
        });
    }

    if config.server.host.trim().is_empty() {
        errors.push(ConfigError::Validation {
            message: "server.host must not be empty".to_string(),
        });
    }

    for (key, url) in [
        ("ollama.base_url", &config.ollama.base_url),
        ("weather.base_url", &config.weather.base_url),
        ("finance.base_url", &config.finance.base_url),
        ("search.base_url", &config.search.base_url),
    ] {
        let url = url.trim();
        if url.is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("{key} must not be empty"),
            });
        } else if !(url.starts_with("http://") || url.starts_with("https://")) {
            errors.push(ConfigError::Validation {
                message: format!("{key} `{url}` must start with http:// or https://"),
            });
        }
    }

    if config.ollama.available_models.is_empty() {
        errors.push(ConfigError::Validation {
            message: "ollama.available_models must list at least one model".to_string(),
        });
    } else if !config
        .ollama
        .available_models
        .contains(&config.ollama.default_model)
    {
        errors.push(ConfigError::Validation {
            message: format!(
                "ollama.default_model `{}` is not in ollama.available_models",
                config.ollama.default_model
            ),
        });
    }

    if config.ollama.request_timeout_secs == 0 {
        errors.push(ConfigError::Validation {
            message: "ollama.request_timeout_secs must be at least 1".to_string(),
        });
    }

    if config.router.max_message_length == 0 {
        errors.push(ConfigError::Validation {
            message: "router.max_message_length must be at least 1".to_string(),
        });
    }

    if config.search.max_results == 0 {
        errors.push(ConfigError::Validation {
            message: "search.max_results must be at least 1".to_string(),
        });
    }

    if let Some(key) = &config.weather.api_key
        && key.trim().is_empty()
    {
        errors.push(ConfigError::Validation {
            message: "weather.api_key must not be blank when set".to_string(),
        });
    }

    if !matches!(
        config.weather.units.as_str(),
        "metric" | "imperial" | "standard"
    ) {
        errors.push(ConfigError::Validation {
            message: format!(
                "weather.units must be one of metric, imperial, standard, got `{}`",
                config.weather.units
            ),
        });
    }

    for (i, entry) in config.finance.overview_symbols.iter().enumerate() {
        if entry.symbol.trim().is_empty() {
            errors.push(ConfigError::Validation {
                message: format!("finance.overview_symbols[{i}].symbol must not be empty"),
            });
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        tracing::debug!(count = errors.len(), "configuration failed validation");
        Err(errors)
    }
}
