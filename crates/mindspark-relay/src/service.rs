//! Request validation and the bounded upstream call.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use mindspark_protocols::{
    ContextMenuEntry, GenerateRequest, ModelClient, ModelError, ModelRelay, RelayRequest,
    RelayResponse, CONTEXT_MENU,
};

/// Upstream deadline applied when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// System instruction sent with overlay requests.
pub const DEFAULT_SYSTEM_INSTRUCTION: &str =
    "You are a helpful assistant. Be concise. Format output in Markdown if helpful.";

/// The privileged relay.
///
/// Every call produces exactly one [`RelayResponse`]; failures are folded
/// into `{success: false, error}` rather than surfaced as faults.
#[derive(Clone)]
pub struct RelayService {
    client: Arc<dyn ModelClient>,
    timeout: Duration,
    system_instruction: String,
}

impl RelayService {
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self {
            client,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            system_instruction: DEFAULT_SYSTEM_INSTRUCTION.to_string(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_system_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.system_instruction = instruction.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Context-menu entries the host should register for selections.
    pub fn context_menu(&self) -> &'static [ContextMenuEntry] {
        &CONTEXT_MENU
    }

    /// Handle one inter-context message.
    pub async fn handle(&self, request: RelayRequest, cancel: CancellationToken) -> RelayResponse {
        if !request.is_model_call() {
            warn!("Unknown relay action: {}", request.action);
            return RelayResponse {
                success: false,
                data: None,
                error: Some(format!("Unknown action: {}", request.action)),
                error_kind: None,
            };
        }

        let response: RelayResponse = self.call_model(request, cancel).await.into();
        match &response.error {
            None => info!("Relay call succeeded"),
            Some(error) => warn!("Relay call failed: {}", error),
        }
        response
    }

    /// Perform the model call for a validated request.
    ///
    /// An empty key fails before any network activity. The call is bounded
    /// by the configured timeout.
    pub async fn call_model(
        &self,
        request: RelayRequest,
        cancel: CancellationToken,
    ) -> Result<String, ModelError> {
        if request.api_key.trim().is_empty() {
            debug!("Rejecting relay call without an API key");
            return Err(ModelError::missing_credential());
        }

        let instruction = request
            .system_instruction
            .unwrap_or_else(|| self.system_instruction.clone());
        let generate = GenerateRequest::new(request.api_key, request.prompt)
            .with_system_instruction(instruction);

        debug!(
            "Calling model {} (timeout {}s)",
            self.client.model(),
            self.timeout.as_secs()
        );

        match tokio::time::timeout(self.timeout, self.client.generate(generate, cancel)).await {
            Ok(result) => result,
            Err(_) => {
                warn!("Model call timed out after {}s", self.timeout.as_secs());
                Err(ModelError::Timeout(self.timeout.as_secs()))
            }
        }
    }
}

#[async_trait]
impl ModelRelay for RelayService {
    async fn call(
        &self,
        request: RelayRequest,
        cancel: CancellationToken,
    ) -> Result<RelayResponse, ModelError> {
        let response = self.handle(request, cancel.clone()).await;
        if cancel.is_cancelled() {
            return Err(ModelError::Cancelled);
        }
        Ok(response)
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
