// SPDX-FileCopyrightText: 2026 Causerie Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! OpenWeatherMap current-conditions lookup.

use async_trait::async_trait;
use causerie_config::WeatherConfig;
use causerie_core::error::LookupError;
use causerie_core::traits::{PluginAdapter, WeatherLookup};
use causerie_core::types::{AdapterType, HealthStatus, WeatherReport};
use causerie_core::CauserieError;
use serde::Deserialize;
use tracing::{debug, info, warn};

/// Weather collaborator backed by the OpenWeatherMap `/weather` endpoint.
pub struct OpenWeatherMap {
    client: reqwest::Client,
    api_key: String,
    base_url: String,
    units: String,
    lang: String,
}

#[derive(Debug, Deserialize)]
struct OwmResponse {
    name: String,
    sys: OwmSys,
    main: OwmMain,
    #[serde(default)]
    weather: Vec<OwmCondition>,
}

#[derive(Debug, Deserialize)]
struct OwmSys {
    #[serde(default)]
    country: String,
}

#[derive(Debug, Deserialize)]
struct OwmMain {
    temp: f64,
    feels_like: f64,
}

#[derive(Debug, Deserialize)]
struct OwmCondition {
    description: String,
    icon: String,
}

impl OpenWeatherMap {
    /// Builds the collaborator. Fails when no API key is configured.
    pub fn new(config: &WeatherConfig) -> Result<Self, CauserieError> {
        let api_key = config
            .api_key
            .clone()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| CauserieError::Lookup {
                message: "La clé API pour le service météo est manquante !".into(),
                source: None,
            })?;

        info!(base_url = %config.base_url, units = %config.units, "weather lookup initialized");
        Ok(Self {
            client: reqwest::Client::new(),
            api_key,
            base_url: config.base_url.clone(),
            units: config.units.clone(),
            lang: config.lang.clone(),
        })
    }
}

#[async_trait]
impl PluginAdapter for OpenWeatherMap {
    fn name(&self) -> &str {
        "openweathermap"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Weather
    }

    async fn health_check(&self) -> Result<HealthStatus, CauserieError> {
        Ok(HealthStatus::Healthy)
    }
}

#[async_trait]
impl WeatherLookup for OpenWeatherMap {
    async fn current_weather(&self, city: &str) -> Result<WeatherReport, LookupError> {
        debug!(city = %city, "fetching weather");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("q", city),
                ("appid", self.api_key.as_str()),
                ("units", self.units.as_str()),
                ("lang", self.lang.as_str()),
            ])
            .send()
            .await
            .map_err(|e| {
                warn!(city = %city, error = %e, "weather request failed");
                LookupError::Upstream(format!("Erreur API météo: {e}"))
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(LookupError::NotFound(format!(
                "La ville \"{city}\" n'a pas été trouvée."
            )));
        }
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or(status.as_str());
            warn!(city = %city, status = %status, "weather API error");
            return Err(LookupError::Upstream(format!("Erreur API météo: {reason}")));
        }

        let body: OwmResponse = response.json().await.map_err(|e| {
            LookupError::InvalidResponse(format!("Réponse météo invalide: {e}"))
        })?;
        let condition = body.weather.into_iter().next().ok_or_else(|| {
            LookupError::InvalidResponse("Réponse météo invalide: conditions absentes".into())
        })?;

        Ok(WeatherReport {
            city: body.name,
            country: body.sys.country,
            temperature: body.main.temp,
            feels_like: body.main.feels_like,
            description: condition.description,
            icon: condition.icon,
        })
    }
}
