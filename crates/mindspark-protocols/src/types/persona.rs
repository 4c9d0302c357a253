//! Persona presets for popup chat.

use serde::{Deserialize, Deserializer, Serialize};

/// A named system-instruction preset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Persona {
    #[default]
    Standard,
    Academic,
    Marketer,
    Coder,
    #[serde(rename = "ELI5")]
    Eli5,
}

impl Persona {
    pub fn all() -> Vec<Persona> {
        vec![
            Persona::Standard,
            Persona::Academic,
            Persona::Marketer,
            Persona::Coder,
            Persona::Eli5,
        ]
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Persona::Standard => "Standard",
            Persona::Academic => "Academic",
            Persona::Marketer => "Marketer",
            Persona::Coder => "Coder",
            Persona::Eli5 => "ELI5",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Persona::all()
            .into_iter()
            .find(|p| p.display_name().eq_ignore_ascii_case(s.trim()))
    }

    pub fn system_prompt(&self) -> &'static str {
        match self {
            Persona::Standard => "You are a helpful AI assistant. Be concise and clear.",
            Persona::Academic => {
                "You are an academic researcher. Use formal, precise language and cite concepts where applicable."
            }
            Persona::Marketer => {
                "You are a marketing expert. Focus on value propositions, persuasive copy, and punchy delivery."
            }
            Persona::Coder => {
                "You are a senior software engineer. Provide code snippets, technical explanations, and focus on best practices."
            }
            Persona::Eli5 => {
                "You are a teacher for young students. Explain complex topics simply using analogies."
            }
        }
    }

    /// Full system instruction for a chat turn.
    pub fn system_instruction(&self) -> String {
        format!(
            "{}\n\nFormat your response in Markdown.\nIf the user provides context, strictly use that context to answer.",
            self.system_prompt()
        )
    }
}

/// Deserialize a persona, falling back to the default for unknown values.
pub fn persona_or_default<'de, D>(deserializer: D) -> Result<Persona, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(Persona::parse).unwrap_or_default())
}
