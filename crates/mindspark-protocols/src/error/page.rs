//! Host page collaborator errors.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PageError {
    #[error("No active page")]
    NoActivePage,

    #[error("Page content unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Error)]
pub enum ClipboardError {
    #[error("Clipboard write failed: {0}")]
    WriteFailed(String),
}
