//! Settings persistence.
//!
//! [`SettingsFileStore`] keeps the settings record as a small JSON object
//! (`{"apiKey": ..., "selectedPersona": ...}`) on disk. Writes go to a
//! sibling temp file first and are renamed into place.

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tokio::fs;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use mindspark_protocols::{Settings, SettingsStore, StorageError};

/// JSON-file backed settings store.
pub struct SettingsFileStore {
    path: PathBuf,
    /// Serializes writers; reads go straight to disk.
    write_lock: Mutex<()>,
}

impl SettingsFileStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl SettingsStore for SettingsFileStore {
    async fn load(&self) -> Result<Settings, StorageError> {
        let content = match fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                debug!("No settings at {:?}, using defaults", self.path);
                return Ok(Settings::default());
            }
            Err(e) => return Err(StorageError::Read(e.to_string())),
        };

        if content.trim().is_empty() {
            return Ok(Settings::default());
        }

        let settings: Settings = serde_json::from_str(&content)?;
        Ok(settings)
    }

    async fn save(&self, settings: &Settings) -> Result<(), StorageError> {
        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)
                    .await
                    .map_err(|e| StorageError::Write(e.to_string()))?;
                info!("Created settings directory: {:?}", parent);
            }
        }

        let content = serde_json::to_string_pretty(settings)
            .map_err(|e| StorageError::Write(e.to_string()))?;
        let tmp = self.path.with_extension("json.tmp");
        fs::write(&tmp, content)
            .await
            .map_err(|e| StorageError::Write(e.to_string()))?;
        fs::rename(&tmp, &self.path)
            .await
            .map_err(|e| StorageError::Write(e.to_string()))?;

        debug!(
            "Saved settings to {:?} (persona: {})",
            self.path,
            settings.selected_persona.display_name()
        );
        Ok(())
    }
}

/// In-memory settings store.
#[derive(Default)]
pub struct MemorySettingsStore {
    settings: RwLock<Settings>,
}

impl MemorySettingsStore {
    pub fn new(settings: Settings) -> Self {
        Self {
            settings: RwLock::new(settings),
        }
    }
}

#[async_trait]
impl SettingsStore for MemorySettingsStore {
    async fn load(&self) -> Result<Settings, StorageError> {
        Ok(self.settings.read().await.clone())
    }

    async fn save(&self, settings: &Settings) -> Result<(), StorageError> {
        *self.settings.write().await = settings.clone();
        Ok(())
    }
}
