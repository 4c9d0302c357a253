//! Upstream model client trait.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

use crate::error::ModelError;

/// A single-turn generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateRequest {
    pub api_key: String,
    pub prompt: String,
    pub system_instruction: Option<String>,
}

impl GenerateRequest {
    pub fn new(api_key: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            prompt: prompt.into(),
            system_instruction: None,
        }
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = Some(instruction.into());
        self
    }
}

/// Performs one call against the hosted model.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Returns the model identifier used for requests.
    fn model(&self) -> &str;

    /// Generate text for a single prompt.
    ///
    /// Returns the first candidate's first text part verbatim.
    async fn generate(
        &self,
        request: GenerateRequest,
        cancel: CancellationToken,
    ) -> Result<String, ModelError>;
}
