//! Native-messaging host.
//!
//! Frames are a 4-byte little-endian length followed by that many bytes of
//! UTF-8 JSON. Replies are written in request order.

use futures::stream::{FuturesOrdered, StreamExt};
use serde::Serialize;
use tokio::io::{AsyncRead, AsyncReadExt, AsyncWrite, AsyncWriteExt};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

use mindspark_protocols::{ModelError, RelayRequest, RelayResponse};

use crate::error::RelayError;
use crate::service::RelayService;

/// Largest frame the host will write.
pub const MAX_OUTGOING_FRAME: usize = 1024 * 1024;

/// Largest frame the host will accept.
pub const MAX_INCOMING_FRAME: usize = 64 * 1024 * 1024;

/// Read one frame. Returns `None` on a clean end of input.
pub async fn read_frame<R>(reader: &mut R) -> Result<Option<Vec<u8>>, RelayError>
where
    R: AsyncRead + Unpin,
{
    let mut len_buf = [0u8; 4];
    // Only EOF before the first prefix byte is a clean end.
    if reader.read(&mut len_buf[..1]).await? == 0 {
        return Ok(None);
    }
    reader.read_exact(&mut len_buf[1..]).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            RelayError::Truncated { expected: 4 }
        } else {
            RelayError::Io(e)
        }
    })?;

    let len = u32::from_le_bytes(len_buf) as usize;
    if len > MAX_INCOMING_FRAME {
        return Err(RelayError::FrameTooLarge {
            len,
            max: MAX_INCOMING_FRAME,
        });
    }

    let mut payload = vec![0u8; len];
    reader.read_exact(&mut payload).await.map_err(|e| {
        if e.kind() == std::io::ErrorKind::UnexpectedEof {
            RelayError::Truncated { expected: len }
        } else {
            RelayError::Io(e)
        }
    })?;
    Ok(Some(payload))
}

/// Serialize `message` and write it as one frame.
pub async fn write_frame<W, T>(writer: &mut W, message: &T) -> Result<(), RelayError>
where
    W: AsyncWrite + Unpin,
    T: Serialize,
{
    let payload = serde_json::to_vec(message)?;
    if payload.len() > MAX_OUTGOING_FRAME {
        return Err(RelayError::FrameTooLarge {
            len: payload.len(),
            max: MAX_OUTGOING_FRAME,
        });
    }

    writer
        .write_all(&(payload.len() as u32).to_le_bytes())
        .await?;
    writer.write_all(&payload).await?;
    writer.flush().await?;
    Ok(())
}

/// Serves a [`RelayService`] over a pair of byte streams.
pub struct NativeHost {
    service: RelayService,
    shutdown: CancellationToken,
}

impl NativeHost {
    pub fn new(service: RelayService) -> Self {
        Self {
            service,
            shutdown: CancellationToken::new(),
        }
    }

    /// Token that cancels every in-flight request when triggered.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    /// Serve until the input ends and every pending reply is written.
    ///
    /// A malformed JSON message gets an error reply. A framing error stops
    /// reading; pending replies are still written before it is returned.
    pub async fn run<R, W>(&self, reader: R, mut writer: W) -> Result<(), RelayError>
    where
        R: AsyncRead + Unpin + Send + 'static,
        W: AsyncWrite + Unpin,
    {
        let (frame_tx, mut frame_rx) = mpsc::channel::<Result<Vec<u8>, RelayError>>(16);
        let reader_task = tokio::spawn(async move {
            let mut reader = reader;
            loop {
                match read_frame(&mut reader).await {
                    Ok(Some(frame)) => {
                        if frame_tx.send(Ok(frame)).await.is_err() {
                            break;
                        }
                    }
                    Ok(None) => break,
                    Err(e) => {
                        let _ = frame_tx.send(Err(e)).await;
                        break;
                    }
                }
            }
        });

        info!("Native host started");
        let mut pending = FuturesOrdered::new();
        let mut input_open = true;
        let mut failure = None;

        loop {
            tokio::select! {
                frame = frame_rx.recv(), if input_open => match frame {
                    Some(Ok(bytes)) => pending.push_back(self.dispatch(bytes)),
                    Some(Err(e)) => {
                        error!("Native host framing error: {}", e);
                        failure = Some(e);
                        input_open = false;
                    }
                    None => {
                        debug!("Native host input closed");
                        input_open = false;
                    }
                },
                Some(response) = pending.next(), if !pending.is_empty() => {
                    self.reply(&mut writer, &response).await?;
                }
                _ = self.shutdown.cancelled(), if input_open => {
                    debug!("Native host shutting down");
                    input_open = false;
                }
            }

            if !input_open && pending.is_empty() {
                break;
            }
        }

        reader_task.abort();
        info!("Native host stopped");
        match failure {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    async fn dispatch(&self, bytes: Vec<u8>) -> RelayResponse {
        match serde_json::from_slice::<RelayRequest>(&bytes) {
            Ok(request) => {
                debug!("Native host request: action={}", request.action);
                self.service
                    .handle(request, self.shutdown.child_token())
                    .await
            }
            Err(e) => {
                warn!("Invalid native message: {}", e);
                RelayResponse {
                    success: false,
                    data: None,
                    error: Some(format!("Invalid message: {}", e)),
                    error_kind: None,
                }
            }
        }
    }

    async fn reply<W>(&self, writer: &mut W, response: &RelayResponse) -> Result<(), RelayError>
    where
        W: AsyncWrite + Unpin,
    {
        match write_frame(writer, response).await {
            Err(RelayError::FrameTooLarge { len, .. }) => {
                warn!("Reply of {} bytes exceeds the native messaging limit", len);
                let fallback = RelayResponse::from_error(&ModelError::MalformedResponse(
                    "Response too large to deliver".to_string(),
                ));
                write_frame(writer, &fallback).await
            }
            other => other,
        }
    }
}

#[cfg(test)]
#[path = "native_tests.rs"]
mod tests;
