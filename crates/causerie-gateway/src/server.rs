// SPDX-FileCopyrightText: 2026 Causerie Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::sync::Arc;

use axum::{Router, routing::get};
use causerie_config::{OllamaConfig, ServerConfig};
use causerie_core::CauserieError;
use causerie_core::traits::{StockLookup, WeatherLookup};
use causerie_router::{ConversationRouter, SessionTable};
use tokio_util::sync::CancellationToken;
use tower_http::cors::CorsLayer;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::ws;

/// Models a client may select, and the one new sessions start with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModelCatalog {
    pub configured: Vec<String>,
    pub default_model: String,
}

impl ModelCatalog {
    pub fn is_configured(&self, model: &str) -> bool {
        self.configured.iter().any(|m| m == model)
    }
}

impl From<&OllamaConfig> for ModelCatalog {
    fn from(config: &OllamaConfig) -> Self {
        Self {
            configured: config.available_models.clone(),
            default_model: config.default_model.clone(),
        }
    }
}

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Turn processor; also exposes the model backend.
    pub router: Arc<ConversationRouter>,
    /// One session per open WebSocket.
    pub sessions: Arc<SessionTable>,
    /// Used directly by the standalone lookup endpoints.
    pub weather: Arc<dyn WeatherLookup>,
    pub stocks: Arc<dyn StockLookup>,
    pub catalog: Arc<ModelCatalog>,
}

/// Builds the application router.
///
/// - GET /health
/// - GET /api/models
/// - GET /api/weather/{city}
/// - GET /api/finance/{symbol}
/// - GET /api/finance/market/overview
/// - GET /api/finance/{symbol}/chart
/// - GET /api/finance/search/{keywords}
/// - GET /ws
/// - everything else from `static_dir`
pub fn build_app(state: GatewayState, static_dir: &str) -> Router {
    let api_routes = Router::new()
        .route("/health", get(handlers::get_health))
        .route("/api/models", get(handlers::get_models))
        .route("/api/weather/{city}", get(handlers::get_weather))
        .route("/api/finance/market/overview", get(handlers::get_market_overview))
        .route("/api/finance/{symbol}", get(handlers::get_quote))
        .route("/api/finance/{symbol}/chart", get(handlers::get_chart))
        .route("/api/finance/search/{keywords}", get(handlers::get_symbol_search))
        .route("/ws", get(ws::ws_handler))
        .with_state(state);

    Router::new()
        .merge(api_routes)
        .fallback_service(ServeDir::new(static_dir))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}

/// Binds to `host:port` and serves until `shutdown` is cancelled.
pub async fn start_server(
    config: &ServerConfig,
    state: GatewayState,
    shutdown: CancellationToken,
) -> Result<(), CauserieError> {
    let app = build_app(state, &config.static_dir);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| CauserieError::Channel {
            message: format!("failed to bind gateway to {addr}: {e}"),
            source: Some(Box::new(e)),
        })?;

    tracing::info!("Gateway server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown.cancelled_owned())
        .await
        .map_err(|e| CauserieError::Channel {
            message: format!("gateway server error: {e}"),
            source: Some(Box::new(e)),
        })?;

    Ok(())
}
