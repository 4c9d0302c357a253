//! Settings persistence trait.

use async_trait::async_trait;

use crate::error::StorageError;
use crate::types::Settings;

/// Durable storage for [`Settings`].
///
/// The relay reads the key only; the popup reads and writes both fields.
#[async_trait]
pub trait SettingsStore: Send + Sync {
    /// Load settings. A missing record yields defaults.
    async fn load(&self) -> Result<Settings, StorageError>;

    /// Replace the stored settings.
    async fn save(&self, settings: &Settings) -> Result<(), StorageError>;

    /// Read only the API key.
    async fn api_key(&self) -> Result<String, StorageError> {
        Ok(self.load().await?.api_key)
    }
}
