//! Configuration schema definitions.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Root configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub model: ModelConfig,

    #[serde(default)]
    pub overlay: OverlayConfig,

    #[serde(default)]
    pub popup: PopupConfig,

    #[serde(default)]
    pub storage: StorageConfig,
}

/// Upstream model configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,

    #[serde(default = "default_connect_timeout")]
    pub connect_timeout_seconds: u64,

    /// Used when a request carries no system instruction of its own.
    #[serde(default = "default_system_instruction")]
    pub system_instruction: String,
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            timeout_seconds: default_timeout(),
            connect_timeout_seconds: default_connect_timeout(),
            system_instruction: default_system_instruction(),
        }
    }
}

fn default_base_url() -> String {
    "https://generativelanguage.googleapis.com/v1beta".to_string()
}

fn default_model() -> String {
    "gemini-3-flash-preview".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_connect_timeout() -> u64 {
    10
}

fn default_system_instruction() -> String {
    "You are a helpful assistant. Be concise. Format output in Markdown if helpful.".to_string()
}

/// In-page overlay timing and layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OverlayConfig {
    /// Delay after pointer-up before the selection is read.
    #[serde(default = "default_settle_delay")]
    pub settle_delay_ms: u64,

    /// Delay after a selection-extending key-up before the selection is read.
    #[serde(default = "default_keyboard_settle_delay")]
    pub keyboard_settle_delay_ms: u64,

    #[serde(default = "default_hover_grace")]
    pub hover_grace_ms: u64,

    #[serde(default = "default_min_selection_chars")]
    pub min_selection_chars: usize,

    #[serde(default = "default_collapsed_height")]
    pub collapsed_height_px: u32,

    #[serde(default = "default_truncation_slack")]
    pub truncation_slack_px: u32,

    #[serde(default = "default_copy_confirm")]
    pub copy_confirm_ms: u64,

    #[serde(default = "default_line_height")]
    pub line_height_px: u32,

    #[serde(default = "default_chars_per_line")]
    pub chars_per_line: usize,

    /// Cancel in-flight requests when the overlay is torn down.
    #[serde(default = "default_true")]
    pub cancel_on_dismiss: bool,

    #[serde(default = "default_trigger_offset")]
    pub trigger_offset_y: f64,

    #[serde(default = "default_menu_offset")]
    pub menu_offset_y: f64,
}

impl Default for OverlayConfig {
    fn default() -> Self {
        Self {
            settle_delay_ms: default_settle_delay(),
            keyboard_settle_delay_ms: default_keyboard_settle_delay(),
            hover_grace_ms: default_hover_grace(),
            min_selection_chars: default_min_selection_chars(),
            collapsed_height_px: default_collapsed_height(),
            truncation_slack_px: default_truncation_slack(),
            copy_confirm_ms: default_copy_confirm(),
            line_height_px: default_line_height(),
            chars_per_line: default_chars_per_line(),
            cancel_on_dismiss: default_true(),
            trigger_offset_y: default_trigger_offset(),
            menu_offset_y: default_menu_offset(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_settle_delay() -> u64 {
    50
}

fn default_keyboard_settle_delay() -> u64 {
    500
}

fn default_hover_grace() -> u64 {
    300
}

fn default_min_selection_chars() -> usize {
    3
}

fn default_collapsed_height() -> u32 {
    140
}

fn default_truncation_slack() -> u32 {
    20
}

fn default_copy_confirm() -> u64 {
    2000
}

fn default_line_height() -> u32 {
    21
}

fn default_chars_per_line() -> usize {
    48
}

fn default_trigger_offset() -> f64 {
    50.0
}

fn default_menu_offset() -> f64 {
    45.0
}

/// Popup chat configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PopupConfig {
    /// Maximum number of page-text characters forwarded as context.
    #[serde(default = "default_page_context_limit")]
    pub page_context_limit: usize,
}

impl Default for PopupConfig {
    fn default() -> Self {
        Self {
            page_context_limit: default_page_context_limit(),
        }
    }
}

fn default_page_context_limit() -> usize {
    10_000
}

/// Settings storage configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Path of the settings file. Defaults to the platform config directory.
    pub settings_path: Option<PathBuf>,
}

impl StorageConfig {
    /// Resolve the settings file path, expanding `~`.
    pub fn resolve_settings_path(&self) -> PathBuf {
        match &self.settings_path {
            Some(path) => PathBuf::from(shellexpand::tilde(&path.to_string_lossy()).to_string()),
            None => dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("mindspark")
                .join("settings.json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_model_defaults() {
        let config = ModelConfig::default();
        assert_eq!(config.model, "gemini-3-flash-preview");
        assert_eq!(config.timeout_seconds, 30);
        assert!(config.base_url.ends_with("/v1beta"));
    }

    #[test]
    fn test_overlay_defaults() {
        let config = OverlayConfig::default();
        assert_eq!(config.settle_delay_ms, 50);
        assert_eq!(config.keyboard_settle_delay_ms, 500);
        assert_eq!(config.hover_grace_ms, 300);
        assert_eq!(config.min_selection_chars, 3);
        assert_eq!(config.copy_confirm_ms, 2000);
        assert!(config.cancel_on_dismiss);
    }

    #[test]
    fn test_partial_section_keeps_defaults() {
        let config: OverlayConfig = toml::from_str("hover_grace_ms = 500").unwrap();
        assert_eq!(config.hover_grace_ms, 500);
        assert_eq!(config.settle_delay_ms, 50);
    }

    #[test]
    fn test_default_settings_path() {
        let path = StorageConfig::default().resolve_settings_path();
        assert!(path.ends_with("mindspark/settings.json"));
    }

    #[test]
    fn test_settings_path_tilde_expanded() {
        let storage = StorageConfig {
            settings_path: Some(PathBuf::from("~/ms/settings.json")),
        };
        let path = storage.resolve_settings_path();
        assert!(!path.to_string_lossy().starts_with('~'));
        assert!(path.ends_with("ms/settings.json"));
    }
}
