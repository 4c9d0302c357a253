//! In-process channel to a spawned relay.

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use mindspark_protocols::{ModelError, ModelRelay, RelayRequest, RelayResponse};

use crate::service::RelayService;

/// A request waiting for its single reply.
struct Envelope {
    request: RelayRequest,
    cancel: CancellationToken,
    reply: oneshot::Sender<RelayResponse>,
}

/// Cloneable sender side of a spawned [`RelayService`].
///
/// The reply channel stays open until the upstream call resolves, so a
/// caller simply awaits [`ModelRelay::call`].
#[derive(Clone)]
pub struct RelayHandle {
    tx: mpsc::Sender<Envelope>,
}

impl RelayService {
    /// Run the service on its own task.
    ///
    /// Each request is served on a separate task, so a slow upstream call
    /// does not hold up the next request. The task ends once every handle
    /// is dropped.
    pub fn spawn(self, buffer: usize) -> (RelayHandle, JoinHandle<()>) {
        let (tx, mut rx) = mpsc::channel::<Envelope>(buffer.max(1));

        let task = tokio::spawn(async move {
            while let Some(envelope) = rx.recv().await {
                let service = self.clone();
                tokio::spawn(async move {
                    let response = service.handle(envelope.request, envelope.cancel).await;
                    if envelope.reply.send(response).is_err() {
                        debug!("Relay caller went away before the reply");
                    }
                });
            }
            debug!("Relay channel closed");
        });

        (RelayHandle { tx }, task)
    }
}

#[async_trait]
impl ModelRelay for RelayHandle {
    async fn call(
        &self,
        request: RelayRequest,
        cancel: CancellationToken,
    ) -> Result<RelayResponse, ModelError> {
        let (reply, rx) = oneshot::channel();
        let envelope = Envelope {
            request,
            cancel: cancel.clone(),
            reply,
        };

        self.tx
            .send(envelope)
            .await
            .map_err(|_| ModelError::TransportFailure("Relay is not running".to_string()))?;

        tokio::select! {
            biased;
            _ = cancel.cancelled() => Err(ModelError::Cancelled),
            reply = rx => reply.map_err(|_| {
                ModelError::TransportFailure("Relay closed before responding".to_string())
            }),
        }
    }
}
