//! Settings subcommand handlers for MindSpark.

use mindspark_config::Config;
use mindspark_popup::{PopupError, KEY_SAVED};
use mindspark_protocols::{Persona, SettingsStore};

use crate::adapters::mask_key;
use crate::cli::SettingsAction;
use crate::register::settings_store;

/// Handle settings subcommands.
pub(crate) async fn handle_settings_command(
    action: SettingsAction,
    config: &Config,
) -> Result<(), Box<dyn std::error::Error>> {
    let store = settings_store(config);
    match action {
        SettingsAction::Show => {
            let settings = store.load().await?;
            let key = if settings.has_api_key() {
                mask_key(&settings.api_key)
            } else {
                "(not set)".to_string()
            };
            println!("API key: {}", key);
            println!("Persona: {}", settings.selected_persona.display_name());
        }
        SettingsAction::SetKey { key } => {
            let key = key.trim();
            if key.is_empty() {
                return Err(PopupError::InvalidKey.into());
            }
            let mut settings = store.load().await?;
            settings.api_key = key.to_string();
            store.save(&settings).await?;
            println!("{}", KEY_SAVED);
        }
        SettingsAction::SetPersona { persona } => {
            let selected = Persona::parse(&persona).ok_or_else(|| {
                let names: Vec<_> = Persona::all().iter().map(|p| p.display_name()).collect();
                format!("Unknown persona: {}. Expected one of: {}", persona, names.join(", "))
            })?;
            let mut settings = store.load().await?;
            settings.selected_persona = selected;
            store.save(&settings).await?;
            println!("Persona: {}", selected.display_name());
        }
        SettingsAction::Path => {
            println!("{}", store.path().display());
        }
    }
    Ok(())
}
