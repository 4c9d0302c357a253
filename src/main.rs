//! MindSpark - select text anywhere and ask a language model about it
//!
//! Main entry point for the MindSpark CLI and native messaging relay.

mod adapters;
mod cli;
mod cmd_chat;
mod cmd_preview;
mod cmd_relay;
mod cmd_settings;
mod register;

use clap::Parser;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use adapters::mindspark_dir;
use cli::{Cli, Commands};
use cmd_chat::run_chat;
use cmd_preview::run_preview;
use cmd_relay::{ask, run_relay};
use cmd_settings::handle_settings_command;
use register::load_config;

/// Initialize tracing with a stderr console layer and a daily log file.
///
/// Stdout carries native messaging frames and command output, so nothing is
/// logged there.
fn init_tracing() -> Result<(), Box<dyn std::error::Error>> {
    let log_dir = mindspark_dir().join("logs");
    std::fs::create_dir_all(&log_dir)?;

    let file_appender = RollingFileAppender::builder()
        .rotation(Rotation::DAILY)
        .filename_prefix("mindspark")
        .filename_suffix("log")
        .max_log_files(14)
        .build(&log_dir)?;
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    // Dropping the guard stops the background writer.
    static GUARD: std::sync::OnceLock<tracing_appender::non_blocking::WorkerGuard> =
        std::sync::OnceLock::new();
    let _ = GUARD.set(guard);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(
            fmt::layer()
                .with_target(true)
                .with_writer(std::io::stderr),
        )
        .with(fmt::layer().with_writer(non_blocking).with_ansi(false))
        .init();

    Ok(())
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing()?;

    let cli = Cli::parse();
    let config = load_config(&cli.config)?;

    match cli.command {
        Commands::Relay => run_relay(&config).await,
        Commands::Ask {
            action,
            persona,
            text,
        } => ask(&config, action, persona, text).await,
        Commands::Chat { page } => run_chat(&config, page).await,
        Commands::Preview { action, text } => run_preview(&config, action, text).await,
        Commands::Settings { action } => handle_settings_command(action, &config).await,
    }
}
