// SPDX-FileCopyrightText: 2026 Causerie Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers: health, model listing, and the standalone
//! weather and finance endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use causerie_core::LookupError;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::server::GatewayState;

/// Response body for GET /health.
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Always "OK" while the process serves requests.
    pub status: String,
    /// RFC 3339 timestamp.
    pub timestamp: String,
    /// Number of open WebSocket sessions.
    pub active_connections: usize,
}

/// Response body for GET /api/models.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelsResponse {
    pub models: Vec<ModelEntry>,
    pub configured: Vec<String>,
    pub default: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// An installed model that matches a configured one.
#[derive(Debug, Serialize, Deserialize)]
pub struct ModelEntry {
    /// Full tagged name, e.g. `llama3.2:latest`.
    pub name: String,
    /// Name without the tag.
    pub display_name: String,
    pub size: u64,
    pub modified: String,
}

/// GET /health
pub async fn get_health(State(state): State<GatewayState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK".to_string(),
        timestamp: chrono::Utc::now().to_rfc3339(),
        active_connections: state.sessions.len(),
    })
}

/// GET /api/models
///
/// Installed models filtered to the configured list. A backend failure is
/// reported in the body with an empty list, not as an HTTP error.
pub async fn get_models(State(state): State<GatewayState>) -> Json<ModelsResponse> {
    let configured = state.catalog.configured.clone();
    let default = state.catalog.default_model.clone();

    match state.router.provider().list_models().await {
        Ok(installed) => {
            let models = installed
                .into_iter()
                .filter(|m| configured.iter().any(|c| m.name.contains(c.as_str())))
                .map(|m| ModelEntry {
                    display_name: m.name.split(':').next().unwrap_or(&m.name).to_string(),
                    name: m.name,
                    size: m.size,
                    modified: m.modified_at,
                })
                .collect();
            Json(ModelsResponse {
                models,
                configured,
                default,
                error: None,
            })
        }
        Err(e) => {
            warn!(error = %e, "failed to list installed models");
            Json(ModelsResponse {
                models: vec![],
                configured,
                default,
                error: Some("Could not connect to Ollama".to_string()),
            })
        }
    }
}

fn lookup_failure(status: StatusCode, err: &LookupError) -> Response {
    (status, Json(err.to_body())).into_response()
}

/// GET /api/weather/{city}
pub async fn get_weather(State(state): State<GatewayState>, Path(city): Path<String>) -> Response {
    match state.weather.current_weather(&city).await {
        Ok(report) => Json(report).into_response(),
        Err(e) => lookup_failure(StatusCode::NOT_FOUND, &e),
    }
}

/// GET /api/finance/{symbol}
pub async fn get_quote(State(state): State<GatewayState>, Path(symbol): Path<String>) -> Response {
    match state.stocks.quote(&symbol).await {
        Ok(quote) => Json(quote).into_response(),
        Err(e) => lookup_failure(StatusCode::NOT_FOUND, &e),
    }
}

/// GET /api/finance/market/overview
pub async fn get_market_overview(State(state): State<GatewayState>) -> Response {
    match state.stocks.market_overview().await {
        Ok(overview) => Json(overview).into_response(),
        Err(e) => lookup_failure(StatusCode::INTERNAL_SERVER_ERROR, &e),
    }
}

/// GET /api/finance/{symbol}/chart
pub async fn get_chart(State(state): State<GatewayState>, Path(symbol): Path<String>) -> Response {
    match state.stocks.intraday(&symbol).await {
        Ok(series) => Json(series).into_response(),
        Err(e) => lookup_failure(StatusCode::NOT_FOUND, &e),
    }
}

/// GET /api/finance/search/{keywords}
pub async fn get_symbol_search(
    State(state): State<GatewayState>,
    Path(keywords): Path<String>,
) -> Response {
    match state.stocks.search_symbols(&keywords).await {
        Ok(matches) => Json(matches).into_response(),
        Err(e) => lookup_failure(StatusCode::INTERNAL_SERVER_ERROR, &e),
    }
}
