//! Terminal stand-ins for browser collaborators.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{info, warn};

use mindspark_overlay::SettingsLauncher;
use mindspark_protocols::{Clipboard, ClipboardError};

/// Get the .mindspark directory path.
pub(crate) fn mindspark_dir() -> PathBuf {
    dirs::home_dir()
        .map(|h| h.join(".mindspark"))
        .unwrap_or_else(|| PathBuf::from(".mindspark"))
}

/// Clipboard that has nowhere to write.
pub(crate) struct NoClipboard;

#[async_trait]
impl Clipboard for NoClipboard {
    async fn write_text(&self, _text: &str) -> Result<(), ClipboardError> {
        Err(ClipboardError::WriteFailed(
            "no clipboard available in the terminal".to_string(),
        ))
    }
}

/// Points the user at the settings command.
pub(crate) struct SettingsHint;

impl SettingsLauncher for SettingsHint {
    fn open_settings(&self) {
        info!("Settings requested");
        warn!("Run `mindspark settings set-key <KEY>` to configure MindSpark");
    }
}

/// Mask all but the last four characters of a key.
pub(crate) fn mask_key(key: &str) -> String {
    let count = key.chars().count();
    if count <= 4 {
        return "*".repeat(count);
    }
    let tail: String = key.chars().skip(count - 4).collect();
    format!("{}{}", "*".repeat(count - 4), tail)
}
