//! Model invocation errors.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Message surfaced when no API key is on record.
pub const MISSING_KEY_MESSAGE: &str = "API Key missing";

/// Message surfaced when the upstream reply carries no usable text.
pub const NO_RESPONSE_MESSAGE: &str = "No response generated.";

/// Coarse classification of a failed model call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ErrorKind {
    /// No API key on record; the user is routed to settings.
    MissingCredential,
    /// The relay or the upstream could not be reached.
    TransportFailure,
    /// The upstream answered with an error payload.
    UpstreamRejection,
    /// The upstream answered without the expected fields.
    MalformedResponse,
}

/// A failed model call.
///
/// The display form is exactly the text shown to the user, so upstream
/// messages pass through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ModelError {
    #[error("{0}")]
    MissingCredential(String),

    #[error("{0}")]
    TransportFailure(String),

    #[error("{0}")]
    UpstreamRejection(String),

    #[error("{0}")]
    MalformedResponse(String),

    #[error("Request timed out after {0} seconds")]
    Timeout(u64),

    #[error("Request cancelled")]
    Cancelled,
}

impl ModelError {
    pub fn missing_credential() -> Self {
        ModelError::MissingCredential(MISSING_KEY_MESSAGE.to_string())
    }

    pub fn no_response() -> Self {
        ModelError::MalformedResponse(NO_RESPONSE_MESSAGE.to_string())
    }

    /// Rebuild an error from a kind and its rendered message.
    pub fn from_kind(kind: ErrorKind, message: impl Into<String>) -> Self {
        let message = message.into();
        match kind {
            ErrorKind::MissingCredential => ModelError::MissingCredential(message),
            ErrorKind::TransportFailure => ModelError::TransportFailure(message),
            ErrorKind::UpstreamRejection => ModelError::UpstreamRejection(message),
            ErrorKind::MalformedResponse => ModelError::MalformedResponse(message),
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            ModelError::MissingCredential(_) => ErrorKind::MissingCredential,
            ModelError::TransportFailure(_) | ModelError::Timeout(_) | ModelError::Cancelled => {
                ErrorKind::TransportFailure
            }
            ModelError::UpstreamRejection(_) => ErrorKind::UpstreamRejection,
            ModelError::MalformedResponse(_) => ErrorKind::MalformedResponse,
        }
    }

    /// The text rendered in the panel that issued the request.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ModelError::Cancelled)
    }
}
