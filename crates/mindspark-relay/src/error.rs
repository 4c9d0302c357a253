//! Relay errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum RelayError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Frame of {len} bytes exceeds the {max} byte limit")]
    FrameTooLarge { len: usize, max: usize },

    #[error("Truncated frame: expected {expected} bytes")]
    Truncated { expected: usize },

    #[error("Relay channel closed")]
    Closed,
}
