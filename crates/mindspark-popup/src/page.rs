//! Page content sources outside a browser.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::debug;

use mindspark_protocols::{PageContent, PageError};

/// Treats a local text file as the active page.
#[derive(Debug, Clone, Default)]
pub struct FilePage {
    path: Option<PathBuf>,
}

impl FilePage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
        }
    }

    /// No active page.
    pub fn none() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PageContent for FilePage {
    async fn visible_text(&self) -> Result<String, PageError> {
        let path = self.path.as_ref().ok_or(PageError::NoActivePage)?;
        debug!(path = %path.display(), "Reading page file");
        tokio::fs::read_to_string(path)
            .await
            .map_err(|e| PageError::Unavailable(format!("{}: {}", path.display(), e)))
    }
}
