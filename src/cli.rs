//! CLI definitions for MindSpark.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// MindSpark CLI.
#[derive(Parser)]
#[command(name = "mindspark")]
#[command(about = "Select text anywhere and ask a language model about it")]
#[command(version)]
pub(crate) struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "mindspark.toml", global = true)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Serve the relay as a native messaging host on stdin/stdout
    Relay,

    /// Send one prompt through the relay and print the reply
    Ask {
        /// Apply an action template (summarize, explain, fix_grammar, translate)
        #[arg(short, long)]
        action: Option<String>,

        /// Persona for a plain prompt (Standard, Academic, Marketer, Coder, ELI5)
        #[arg(short, long)]
        persona: Option<String>,

        /// Prompt or selected text
        text: String,
    },

    /// Interactive popup chat in the terminal
    Chat {
        /// Text file treated as the active page for /summarize and /explain
        #[arg(long)]
        page: Option<PathBuf>,
    },

    /// Run an action through the selection overlay and print the rendered HTML
    Preview {
        /// Action to expand
        #[arg(short, long, default_value = "summarize")]
        action: String,

        /// Selected text
        text: String,
    },

    /// Settings management commands
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
}

#[derive(Subcommand)]
pub(crate) enum SettingsAction {
    /// Show the stored settings (key masked)
    Show,

    /// Store the API key
    SetKey {
        /// Gemini API key
        key: String,
    },

    /// Store the default persona
    SetPersona {
        /// Persona name
        persona: String,
    },

    /// Print the settings file location
    Path,
}
