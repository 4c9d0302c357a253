//! Relay message protocol.
//!
//! The overlay and popup never hold network privileges. They send a
//! [`RelayRequest`] to the relay and receive exactly one [`RelayResponse`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::error::{ErrorKind, ModelError};

/// Action name for a model call.
pub const CALL_MODEL: &str = "CALL_MODEL";

/// Legacy action name accepted as an alias of [`CALL_MODEL`].
pub const CALL_GEMINI: &str = "CALL_GEMINI";

/// Request sent from a UI context to the relay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayRequest {
    pub action: String,

    #[serde(default)]
    pub api_key: String,

    #[serde(default)]
    pub prompt: String,

    /// Optional system instruction; the relay's default is used when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_instruction: Option<String>,
}

impl RelayRequest {
    pub fn call_model(api_key: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            action: CALL_MODEL.to_string(),
            api_key: api_key.into(),
            prompt: prompt.into(),
            system_instruction: None,
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }

    /// Whether the action names a model call.
    pub fn is_model_call(&self) -> bool {
        self.action == CALL_MODEL || self.action == CALL_GEMINI
    }
}

/// Reply from the relay. Exactly one is produced per request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelayResponse {
    pub success: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_kind: Option<ErrorKind>,
}

impl RelayResponse {
    pub fn ok(data: impl Into<String>) -> Self {
        Self {
            success: true,
            data: Some(data.into()),
            error: None,
            error_kind: None,
        }
    }

    pub fn from_error(err: &ModelError) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(err.user_message()),
            error_kind: Some(err.kind()),
        }
    }

    /// Convert back into the caller-facing result.
    ///
    /// A failure without a kind is treated as a transport failure.
    pub fn into_result(self) -> Result<String, ModelError> {
        if self.success {
            return Ok(self.data.unwrap_or_default());
        }
        let kind = self.error_kind.unwrap_or(ErrorKind::TransportFailure);
        let message = self.error.unwrap_or_else(|| "Unknown error".to_string());
        Err(ModelError::from_kind(kind, message))
    }
}

impl From<Result<String, ModelError>> for RelayResponse {
    fn from(result: Result<String, ModelError>) -> Self {
        match result {
            Ok(text) => RelayResponse::ok(text),
            Err(err) => RelayResponse::from_error(&err),
        }
    }
}

/// Channel from a UI context to the relay.
#[async_trait]
pub trait ModelRelay: Send + Sync {
    /// Send one request and wait for its single response.
    ///
    /// Cancelling `cancel` abandons the request; implementations return
    /// [`ModelError::Cancelled`] in that case.
    async fn call(
        &self,
        request: RelayRequest,
        cancel: CancellationToken,
    ) -> Result<RelayResponse, ModelError>;
}

#[cfg(test)]
#[path = "relay_tests.rs"]
mod tests;
