//! Test doubles shared by the relay tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use mindspark_protocols::{GenerateRequest, ModelClient, ModelError};

pub(crate) enum Behavior {
    /// Reply with the prompt prefixed by "echo: ".
    Echo,
    Fail(ModelError),
    /// Sleep before echoing, honoring cancellation.
    Delay(Duration),
}

pub(crate) struct StubClient {
    behavior: Behavior,
    calls: AtomicUsize,
    last_request: Mutex<Option<GenerateRequest>>,
}

impl StubClient {
    pub(crate) fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            last_request: Mutex::new(None),
        }
    }

    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub(crate) fn last_request(&self) -> Option<GenerateRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl ModelClient for StubClient {
    fn model(&self) -> &str {
        "stub-model"
    }

    async fn generate(
        &self,
        request: GenerateRequest,
        cancel: CancellationToken,
    ) -> Result<String, ModelError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());

        match &self.behavior {
            Behavior::Echo => Ok(format!("echo: {}", request.prompt)),
            Behavior::Fail(err) => Err(err.clone()),
            Behavior::Delay(delay) => {
                tokio::select! {
                    _ = cancel.cancelled() => Err(ModelError::Cancelled),
                    _ = tokio::time::sleep(*delay) => Ok(format!("echo: {}", request.prompt)),
                }
            }
        }
    }
}
