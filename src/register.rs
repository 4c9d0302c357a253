//! Builds configured services for the subcommands.

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use tracing::{info, warn};

use mindspark_config::{Config, ConfigLoader, ConfigValidator, SettingsFileStore};
use mindspark_provider_gemini::GeminiClient;
use mindspark_relay::RelayService;

/// Load and validate the configuration. A missing file yields defaults.
pub(crate) fn load_config(path: &Path) -> Result<Config, Box<dyn std::error::Error>> {
    let config = ConfigLoader::load_or_default(path)?;
    let warnings = ConfigValidator::validate(&config).into_result()?;
    for warning in warnings {
        warn!("Config {}: {}", warning.path, warning.message);
    }
    Ok(config)
}

/// The relay service backed by the Gemini client.
pub(crate) fn relay_service(config: &Config) -> RelayService {
    let model = &config.model;
    let client = GeminiClient::with_connect_timeout(
        model.model.clone(),
        model.base_url.clone(),
        Duration::from_secs(model.connect_timeout_seconds),
    );
    info!(model = %model.model, base_url = %model.base_url, "Gemini client configured");

    RelayService::new(Arc::new(client))
        .with_timeout(Duration::from_secs(model.timeout_seconds))
        .with_system_instruction(model.system_instruction.clone())
}

pub(crate) fn settings_store(config: &Config) -> SettingsFileStore {
    SettingsFileStore::new(config.storage.resolve_settings_path())
}
