//! Persisted settings shared by every context.

use serde::{Deserialize, Serialize};

use super::persona::{persona_or_default, Persona};

/// The only persisted state: an API key and the chosen persona.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Settings {
    #[serde(default)]
    pub api_key: String,

    #[serde(default, deserialize_with = "persona_or_default")]
    pub selected_persona: Persona,
}

impl Settings {
    pub fn new(api_key: impl Into<String>, selected_persona: Persona) -> Self {
        Self {
            api_key: api_key.into(),
            selected_persona,
        }
    }

    pub fn has_api_key(&self) -> bool {
        !self.api_key.trim().is_empty()
    }
}
