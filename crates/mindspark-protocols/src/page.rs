//! Page and clipboard collaborators.

use async_trait::async_trait;

use crate::error::{ClipboardError, PageError};

/// Reads the visible text of the active page.
#[async_trait]
pub trait PageContent: Send + Sync {
    async fn visible_text(&self) -> Result<String, PageError>;
}

/// Writes plain text to the system clipboard.
#[async_trait]
pub trait Clipboard: Send + Sync {
    async fn write_text(&self, text: &str) -> Result<(), ClipboardError>;
}
