// SPDX-FileCopyrightText: 2026 Causerie Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP and WebSocket transport for the Causerie gateway.
//!
//! Serves the chat WebSocket, the model listing and standalone lookup
//! endpoints, and the static web client.

pub mod handlers;
pub mod server;
pub mod ws;

pub use server::{GatewayState, ModelCatalog, build_app, start_server};
pub use ws::{ClientEvent, INVALID_MESSAGE, ServerEvent, handle_event, handle_text};
