// SPDX-FileCopyrightText: 2026 Causerie Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Causerie assistant gateway.

use thiserror::Error;

/// User-facing text surfaced when a conversation turn cannot be completed.
pub const TURN_FAILED_MESSAGE: &str =
    "Désolé, une erreur est survenue lors du traitement de votre demande.";

/// The primary error type used across adapter traits and the conversation router.
#[derive(Debug, Error)]
pub enum CauserieError {
    /// Model backend errors (connection refused, HTTP failure, malformed reply).
    #[error("provider error: {message}")]
    Provider {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// A lookup collaborator could not be constructed or reached at all.
    #[error("lookup error: {message}")]
    Lookup {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Transport errors (socket bind failure, closed connection).
    #[error("channel error: {message}")]
    Channel {
        message: String,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// No live session is registered under the given identifier.
    #[error("session not found: {0}")]
    SessionNotFound(String),

    /// The user message was empty or whitespace only.
    #[error("message cannot be empty")]
    EmptyMessage,

    /// The user message exceeded the configured length limit.
    #[error("message exceeds maximum length of {0} characters")]
    MessageTooLong(usize),

    /// The requested model is not configured or not installed. Carries the
    /// complete sentence shown to the client.
    #[error("{0}")]
    ModelUnavailable(String),

    /// A model call failed mid-turn; the pending user turn was rolled back.
    #[error("{}", TURN_FAILED_MESSAGE)]
    TurnFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

/// Failure reported by a weather or finance collaborator.
///
/// The `Display` output is the message shown to the user, so variants carry
/// the complete sentence rather than a fragment.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LookupError {
    /// The requested city or symbol does not exist upstream.
    #[error("{0}")]
    NotFound(String),

    /// The upstream service failed or could not be reached.
    #[error("{0}")]
    Upstream(String),

    /// The upstream service answered with something we could not interpret.
    #[error("{0}")]
    InvalidResponse(String),
}

impl LookupError {
    /// Returns the user-facing message carried by this error.
    pub fn message(&self) -> &str {
        match self {
            LookupError::NotFound(m) | LookupError::Upstream(m) | LookupError::InvalidResponse(m) => {
                m
            }
        }
    }

    /// Renders the `{"error": true, "message": ...}` body sent to HTTP callers.
    pub fn to_body(&self) -> serde_json::Value {
        serde_json::json!({
            "error": true,
            "message": self.message(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn turn_failed_displays_generic_message() {
        let err = CauserieError::TurnFailed {
            source: Box::new(std::io::Error::other("connection refused")),
        };
        assert_eq!(err.to_string(), TURN_FAILED_MESSAGE);
        assert!(!err.to_string().contains("connection refused"));
    }

    #[test]
    fn message_validation_errors_display() {
        assert_eq!(CauserieError::EmptyMessage.to_string(), "message cannot be empty");
        assert_eq!(
            CauserieError::MessageTooLong(4000).to_string(),
            "message exceeds maximum length of 4000 characters"
        );
    }

    #[test]
    fn model_unavailable_displays_its_sentence() {
        let err = CauserieError::ModelUnavailable("Model phi is not available in the configuration.".into());
        assert_eq!(err.to_string(), "Model phi is not available in the configuration.");
    }

    #[test]
    fn lookup_error_display_is_the_user_message() {
        let err = LookupError::NotFound("La ville \"Atlantis\" n'a pas été trouvée.".into());
        assert_eq!(err.to_string(), "La ville \"Atlantis\" n'a pas été trouvée.");
        assert_eq!(err.message(), err.to_string());
    }

    #[test]
    fn lookup_error_body_shape() {
        let body = LookupError::Upstream("Failed to fetch stock data.".into()).to_body();
        assert_eq!(body["error"], true);
        assert_eq!(body["message"], "Failed to fetch stock data.");
    }
}
