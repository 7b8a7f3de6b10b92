// SPDX-FileCopyrightText: 2026 Causerie Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Tool routing and answer composition for the Causerie gateway.
//!
//! This crate provides:
//! - [`ConversationRouter`]: processes a user turn, dispatching at most one
//!   lookup and composing the final answer
//! - [`KeywordFilter`]: advisory keyword scan selecting the output mode
//! - [`extract_tool_call`]: balanced-brace tool-call parser
//! - [`Session`] and [`SessionTable`]: per-connection state and its lifecycle

pub mod answer;
pub mod classifier;
pub mod extract;
pub mod prompt;
pub mod router;
pub mod session;
pub mod sessions;
pub mod tools;

pub use answer::{Answer, ToolAnswer};
pub use classifier::{KeywordFilter, KeywordHint};
pub use extract::{Extraction, extract_tool_call, first_balanced_object};
pub use router::{ConversationRouter, DEFAULT_MAX_MESSAGE_LENGTH};
pub use session::Session;
pub use sessions::{SessionTable, SharedSession};
pub use tools::{ToolInvocation, ToolKind, ToolToggles, TurnOptions};
