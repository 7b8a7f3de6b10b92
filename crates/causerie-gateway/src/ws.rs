// SPDX-FileCopyrightText: 2026 Causerie Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! WebSocket handler for the chat session.
//!
//! Client -> Server (JSON):
//! ```json
//! {"type": "chat_message", "message": "Quel temps fait-il à Lyon ?", "options": {"web_search_enabled": true}}
//! {"type": "model_change", "model": "mistral"}
//! {"type": "get_available_models"}
//! ```
//!
//! Server -> Client (JSON):
//! ```json
//! {"type": "chat_answer", "answer": "..."}
//! {"type": "chat_answer", "answer": {"type": "weather", "text": "...", "data": {...}}}
//! {"type": "model_changed", "success": true, "model": "mistral"}
//! {"type": "available_models", "models": ["llama3.2", "mistral"]}
//! {"type": "error", "message": "..."}
//! ```
//!
//! Each connection owns one session, created on upgrade and destroyed when
//! the socket closes. Events from one connection are handled in order.

use axum::{
    extract::{
        State,
        ws::{Message, WebSocket, WebSocketUpgrade},
    },
    response::Response,
};
use causerie_core::CauserieError;
use causerie_core::types::SessionId;
use causerie_router::{Answer, SharedSession, TurnOptions};
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use crate::server::GatewayState;

/// WebSocket event from client.
#[derive(Debug, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ClientEvent {
    ChatMessage {
        message: String,
        #[serde(default)]
        options: TurnOptions,
    },
    ModelChange {
        model: String,
    },
    GetAvailableModels,
}

/// WebSocket event to client.
#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ServerEvent {
    ChatAnswer { answer: Answer },
    ModelChanged { success: bool, model: String },
    AvailableModels { models: Vec<String> },
    Error { message: String },
}

impl ServerEvent {
    fn error(message: impl Into<String>) -> Self {
        ServerEvent::Error {
            message: message.into(),
        }
    }
}

/// WebSocket upgrade handler.
pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<GatewayState>) -> Response {
    ws.on_upgrade(|socket| handle_socket(socket, state))
}

/// Handle an individual WebSocket connection.
///
/// A sender task drains an mpsc channel into the socket while the receive
/// loop processes client events one at a time.
async fn handle_socket(socket: WebSocket, state: GatewayState) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let (session_id, session) = state.sessions.create_session(&state.catalog.default_model);
    info!(session_id = %session_id, "WebSocket connected");

    let (tx, mut rx) = mpsc::channel::<String>(64);

    let sender_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if ws_sender.send(Message::Text(msg.into())).await.is_err() {
                break;
            }
        }
    });

    while let Some(Ok(msg)) = ws_receiver.next().await {
        match msg {
            Message::Text(text) => {
                let reply = handle_text(&state, &session_id, &session, &text).await;
                let payload = match serde_json::to_string(&reply) {
                    Ok(p) => p,
                    Err(e) => {
                        warn!(session_id = %session_id, "failed to serialize event: {e}");
                        continue;
                    }
                };
                if tx.send(payload).await.is_err() {
                    break;
                }
            }
            Message::Close(_) => break,
            _ => {}
        }
    }

    state.sessions.destroy_session(&session_id);
    sender_task.abort();
    info!(session_id = %session_id, "WebSocket disconnected");
}

/// Message sent back when a client frame is not a recognized event.
pub const INVALID_MESSAGE: &str = "Invalid message format.";

/// Parses one text frame and handles it. Frames that do not decode to a
/// [`ClientEvent`] get an `error` event instead of being dropped.
pub async fn handle_text(
    state: &GatewayState,
    session_id: &SessionId,
    session: &SharedSession,
    text: &str,
) -> ServerEvent {
    match serde_json::from_str::<ClientEvent>(text) {
        Ok(event) => handle_event(state, session_id, session, event).await,
        Err(e) => {
            warn!(session_id = %session_id, "invalid WebSocket message: {e}");
            ServerEvent::error(INVALID_MESSAGE)
        }
    }
}

/// Handles one client event against the connection's session.
pub async fn handle_event(
    state: &GatewayState,
    session_id: &SessionId,
    session: &SharedSession,
    event: ClientEvent,
) -> ServerEvent {
    match event {
        ClientEvent::ChatMessage { message, options } => {
            let mut guard = session.lock().await;
            debug!(session_id = %session_id, model = %guard.model(), "chat message received");
            match state.router.process_turn(&mut guard, &message, options).await {
                Ok(answer) => ServerEvent::ChatAnswer { answer },
                Err(e) => ServerEvent::error(e.to_string()),
            }
        }
        ClientEvent::ModelChange { model } => change_model(state, session_id, model).await,
        ClientEvent::GetAvailableModels => ServerEvent::AvailableModels {
            models: state.catalog.configured.clone(),
        },
    }
}

async fn change_model(state: &GatewayState, session_id: &SessionId, model: String) -> ServerEvent {
    if let Err(e) = check_model(state, &model).await {
        debug!(session_id = %session_id, model = %model, "model change rejected");
        return ServerEvent::error(e.to_string());
    }
    match state.sessions.reset_session(session_id, &model).await {
        Ok(()) => {
            info!(session_id = %session_id, model = %model, "model changed");
            ServerEvent::ModelChanged {
                success: true,
                model,
            }
        }
        Err(e) => {
            warn!(session_id = %session_id, error = %e, "model change failed");
            ServerEvent::error(format!(
                "Failed to switch to model {model}. Please ensure Ollama is running and the model is installed."
            ))
        }
    }
}

/// A model must be in the configured list and installed on the backend.
async fn check_model(state: &GatewayState, model: &str) -> Result<(), CauserieError> {
    if !state.catalog.is_configured(model) {
        return Err(CauserieError::ModelUnavailable(format!(
            "Model {model} is not available in the configuration."
        )));
    }
    if !state.router.provider().is_model_available(model).await {
        return Err(CauserieError::ModelUnavailable(format!(
            "Model \"{model}\" is not installed. Please install it with: ollama pull {model}"
        )));
    }
    Ok(())
}
