// SPDX-FileCopyrightText: 2026 Causerie Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turn processing: classify, dispatch at most one lookup, compose.
//!
//! A turn makes one classification call to the model. If the reply carries a
//! valid call to an enabled tool, the matching collaborator is queried and a
//! second, plain-text composition call phrases the final answer. Any model
//! failure rolls the session back to its state before the turn.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use causerie_core::CauserieError;
use causerie_core::traits::{ProviderAdapter, StockLookup, WeatherLookup, WebSearch};
use causerie_core::types::{ChatMessage, ProviderRequest, ResponseFormat};

use crate::answer::{Answer, ToolAnswer};
use crate::classifier::KeywordFilter;
use crate::extract::{Extraction, extract_tool_call};
use crate::prompt;
use crate::session::Session;
use crate::tools::{ToolInvocation, ToolKind, TurnOptions};

/// Default cap on user message length, in characters.
pub const DEFAULT_MAX_MESSAGE_LENGTH: usize = 4000;

/// The conversation router. Holds the injected collaborators; all
/// per-user state lives in the [`Session`] passed to each call.
pub struct ConversationRouter {
    provider: Arc<dyn ProviderAdapter>,
    weather: Arc<dyn WeatherLookup>,
    stocks: Arc<dyn StockLookup>,
    search: Arc<dyn WebSearch>,
    keywords: KeywordFilter,
    max_message_length: usize,
}

impl ConversationRouter {
    pub fn new(
        provider: Arc<dyn ProviderAdapter>,
        weather: Arc<dyn WeatherLookup>,
        stocks: Arc<dyn StockLookup>,
        search: Arc<dyn WebSearch>,
    ) -> Self {
        Self {
            provider,
            weather,
            stocks,
            search,
            keywords: KeywordFilter::new(),
            max_message_length: DEFAULT_MAX_MESSAGE_LENGTH,
        }
    }

    pub fn with_max_message_length(mut self, max: usize) -> Self {
        self.max_message_length = max;
        self
    }

    pub fn provider(&self) -> &Arc<dyn ProviderAdapter> {
        &self.provider
    }

    /// Processes one user turn against `session`.
    ///
    /// On success exactly two turns (user, assistant) are appended. On a
    /// model failure the history is left as it was and
    /// [`CauserieError::TurnFailed`] is returned. Empty or over-long text is
    /// rejected before anything is touched.
    pub async fn process_turn(
        &self,
        session: &mut Session,
        text: &str,
        options: TurnOptions,
    ) -> Result<Answer, CauserieError> {
        if text.trim().is_empty() {
            return Err(CauserieError::EmptyMessage);
        }
        if text.chars().count() > self.max_message_length {
            return Err(CauserieError::MessageTooLong(self.max_message_length));
        }

        session.apply_options(&options);
        let checkpoint = session.history().len();
        session.push(ChatMessage::user(text));

        match self.run_turn(session, text).await {
            Ok(answer) => Ok(answer),
            Err(e) => {
                session.rollback_to(checkpoint);
                error!(session_id = %session.id(), error = %e, "turn failed, user turn rolled back");
                Err(CauserieError::TurnFailed {
                    source: Box::new(e),
                })
            }
        }
    }

    async fn run_turn(&self, session: &mut Session, text: &str) -> Result<Answer, CauserieError> {
        let toggles = session.toggles();
        let hint = self.keywords.hint(text, &toggles);
        debug!(
            session_id = %session.id(),
            format = %hint.format,
            matched = ?hint.matched,
            "keyword hint"
        );

        let mut messages = Vec::with_capacity(session.history().len() + 1);
        messages.push(ChatMessage::system(prompt::system_prompt(&toggles)));
        messages.extend_from_slice(session.history());
        let raw = self
            .provider
            .chat(ProviderRequest {
                model: session.model().to_string(),
                messages,
                format: hint.format,
            })
            .await?
            .content;

        let invocation = match extract_tool_call(&raw) {
            Extraction::Tool(call) if toggles.allows(call.kind()) => Some(call),
            Extraction::Tool(call) => {
                warn!(session_id = %session.id(), tool = %call.kind(), "tool disabled for session, answering directly");
                None
            }
            Extraction::Malformed(reason) => {
                warn!(session_id = %session.id(), %reason, "malformed tool JSON, answering directly");
                None
            }
            Extraction::Unrecognized(reason) => {
                debug!(session_id = %session.id(), %reason, "no valid tool call");
                None
            }
            Extraction::NoJson => None,
        };

        let Some(invocation) = invocation else {
            debug!(session_id = %session.id(), "direct answer");
            session.push(ChatMessage::assistant(raw.clone()));
            return Ok(Answer::Text(raw));
        };

        info!(
            session_id = %session.id(),
            tool = %invocation.kind(),
            argument = invocation.argument(),
            "dispatching tool"
        );
        self.dispatch(session, text, invocation).await
    }

    async fn dispatch(
        &self,
        session: &mut Session,
        text: &str,
        invocation: ToolInvocation,
    ) -> Result<Answer, CauserieError> {
        match invocation {
            ToolInvocation::Weather { city } => match self.weather.current_weather(&city).await {
                Ok(report) => {
                    let instruction = prompt::weather_composition(text, &report);
                    let reply = self
                        .compose(session, ToolKind::Weather, &city, instruction)
                        .await?;
                    Ok(Answer::Tool(ToolAnswer::Weather {
                        text: reply,
                        data: report,
                    }))
                }
                Err(e) => {
                    warn!(session_id = %session.id(), city = %city, error = %e, "weather lookup failed");
                    Ok(Self::apologize(session, prompt::weather_apology(e.message())))
                }
            },
            ToolInvocation::WebSearch { query } => {
                let results = self.search.search(&query).await;
                let instruction = prompt::search_composition(text, &results);
                let reply = self
                    .compose(session, ToolKind::WebSearch, &query, instruction)
                    .await?;
                Ok(Answer::Text(reply))
            }
            ToolInvocation::Stock { symbol } => match self.stocks.quote(&symbol).await {
                Ok(quote) => {
                    let instruction = prompt::stock_composition(text, &quote);
                    let reply = self
                        .compose(session, ToolKind::Stock, &symbol, instruction)
                        .await?;
                    Ok(Answer::Tool(ToolAnswer::Finance {
                        text: reply,
                        data: quote,
                    }))
                }
                Err(e) => {
                    warn!(session_id = %session.id(), symbol = %symbol, error = %e, "stock lookup failed");
                    Ok(Self::apologize(session, prompt::stock_apology(e.message())))
                }
            },
        }
    }

    /// Second model call: history, acknowledgment, then the grounded instruction.
    /// Appends the composed reply to history.
    async fn compose(
        &self,
        session: &mut Session,
        kind: ToolKind,
        argument: &str,
        instruction: String,
    ) -> Result<String, CauserieError> {
        let mut messages = session.history().to_vec();
        messages.push(ChatMessage::assistant(prompt::acknowledgment(kind, argument)));
        messages.push(ChatMessage::user(instruction));

        let reply = self
            .provider
            .chat(ProviderRequest {
                model: session.model().to_string(),
                messages,
                format: ResponseFormat::Text,
            })
            .await?
            .content;
        session.push(ChatMessage::assistant(reply.clone()));
        Ok(reply)
    }

    fn apologize(session: &mut Session, apology: String) -> Answer {
        session.push(ChatMessage::assistant(apology.clone()));
        Answer::Text(apology)
    }
}
