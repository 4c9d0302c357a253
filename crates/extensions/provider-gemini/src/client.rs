//! Gemini API client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use mindspark_protocols::{GenerateRequest, ModelClient, ModelError};

use crate::types::*;

/// Default endpoint root.
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Default model identifier.
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";

/// Gemini API client.
///
/// Holds no credential; the key travels with each request.
pub struct GeminiClient {
    client: Client,
    base_url: String,
    model: String,
}

impl GeminiClient {
    /// Create a client for `model` against the default endpoint.
    pub fn new(model: impl Into<String>) -> Self {
        Self::with_url(model, DEFAULT_BASE_URL)
    }

    /// Create a client against a custom endpoint root.
    pub fn with_url(model: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self::with_connect_timeout(model, base_url, Duration::from_secs(10))
    }

    pub fn with_connect_timeout(
        model: impl Into<String>,
        base_url: impl Into<String>,
        connect_timeout: Duration,
    ) -> Self {
        let client = Client::builder()
            .connect_timeout(connect_timeout)
            .build()
            .unwrap_or_else(|e| {
                warn!("Falling back to default HTTP client: {}", e);
                Client::new()
            });
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            model: model.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn endpoint(&self) -> String {
        format!("{}/models/{}:generateContent", self.base_url, self.model)
    }

    /// Perform one `generateContent` call.
    pub async fn generate_content(
        &self,
        api_key: &str,
        request: &GenerateContentRequest,
    ) -> Result<GenerateContentResponse, ModelError> {
        debug!("Gemini generate_content: model={}", self.model);

        let response = self
            .client
            .post(self.endpoint())
            .query(&[("key", api_key)])
            .json(request)
            .send()
            .await
            .map_err(transport_error)?;

        let status = response.status();
        let body = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            debug!("Gemini returned HTTP {}", status.as_u16());
            return Err(match serde_json::from_str::<GeminiError>(&body) {
                Ok(e) => ModelError::UpstreamRejection(e.error.message_or_default()),
                Err(_) => ModelError::UpstreamRejection(format!(
                    "Gemini API Error (HTTP {})",
                    status.as_u16()
                )),
            });
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body).map_err(|e| {
            debug!("Unparseable Gemini response: {}", e);
            ModelError::no_response()
        })?;

        if let Some(error) = &parsed.error {
            return Err(ModelError::UpstreamRejection(error.message_or_default()));
        }

        Ok(parsed)
    }
}

fn transport_error(err: reqwest::Error) -> ModelError {
    // The URL carries the key in its query string.
    let detail = err.without_url().to_string();
    ModelError::TransportFailure(format!("Failed to reach the model: {}", detail))
}

#[async_trait]
impl ModelClient for GeminiClient {
    fn model(&self) -> &str {
        &self.model
    }

    async fn generate(
        &self,
        request: GenerateRequest,
        cancel: CancellationToken,
    ) -> Result<String, ModelError> {
        if request.api_key.trim().is_empty() {
            return Err(ModelError::missing_credential());
        }

        let mut body = GenerateContentRequest::from_prompt(request.prompt);
        if let Some(instruction) = request.system_instruction {
            body = body.with_system_instruction(instruction);
        }

        tokio::select! {
            biased;
            _ = cancel.cancelled() => {
                debug!("Gemini request cancelled");
                Err(ModelError::Cancelled)
            }
            result = self.generate_content(&request.api_key, &body) => {
                let response = result?;
                response
                    .first_text()
                    .map(str::to_string)
                    .ok_or_else(ModelError::no_response)
            }
        }
    }
}

#[cfg(test)]
#[path = "client_tests.rs"]
mod tests;
