// SPDX-FileCopyrightText: 2026 Causerie Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `causerie serve` command implementation.
//!
//! Builds the model backend and the lookup collaborators, wires them into the
//! conversation router, and runs the gateway until a shutdown signal.

use std::sync::Arc;

use causerie_config::CauserieConfig;
use causerie_core::traits::{PluginAdapter, ProviderAdapter};
use causerie_core::types::HealthStatus;
use causerie_core::CauserieError;
use causerie_gateway::{GatewayState, ModelCatalog};
use causerie_lookup::{Finnhub, OpenWeatherMap, SearxSearch};
use causerie_ollama::OllamaProvider;
use causerie_router::{ConversationRouter, SessionTable, ToolToggles};
use tracing::{info, warn};

use crate::shutdown;

/// Runs the server until SIGINT or SIGTERM.
pub async fn run_serve(config: CauserieConfig) -> Result<(), CauserieError> {
    init_tracing(&config.server.log_level);

    let provider = Arc::new(OllamaProvider::new(&config.ollama)?);
    let weather = Arc::new(OpenWeatherMap::new(&config.weather)?);
    let stocks = Arc::new(Finnhub::new(&config.finance));
    let search = Arc::new(SearxSearch::new(&config.search));

    match provider.health_check().await? {
        HealthStatus::Healthy => {
            if !provider.is_model_available(&config.ollama.default_model).await {
                warn!(
                    model = %config.ollama.default_model,
                    "default model is not installed, run: ollama pull {}",
                    config.ollama.default_model
                );
            }
        }
        HealthStatus::Degraded(reason) | HealthStatus::Unhealthy(reason) => {
            warn!(base_url = %config.ollama.base_url, %reason, "Ollama is not reachable yet");
        }
    }
    if let HealthStatus::Degraded(reason) = stocks.health_check().await? {
        warn!(%reason, "finance lookup degraded");
    }

    let router = ConversationRouter::new(provider, weather.clone(), stocks.clone(), search)
        .with_max_message_length(config.router.max_message_length);
    let sessions = SessionTable::new(ToolToggles::new(
        config.router.web_search_enabled,
        config.router.finance_enabled,
    ));

    let state = GatewayState {
        router: Arc::new(router),
        sessions: Arc::new(sessions),
        weather,
        stocks,
        catalog: Arc::new(ModelCatalog::from(&config.ollama)),
    };

    info!(
        models = %config.ollama.available_models.join(", "),
        web_search = config.router.web_search_enabled,
        finance = config.router.finance_enabled,
        "causerie starting"
    );

    let cancel = shutdown::install_signal_handler();
    causerie_gateway::start_server(&config.server, state, cancel).await?;

    info!("causerie serve shutdown complete");
    Ok(())
}

/// Initializes the tracing subscriber with the given log level.
pub fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("causerie={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .init();
}
