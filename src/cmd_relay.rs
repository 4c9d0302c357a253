//! Relay subcommand handlers for MindSpark.

use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use mindspark_config::Config;
use mindspark_protocols::{ActionId, ModelRelay, Persona, RelayRequest, RelayResponse, SettingsStore};
use mindspark_relay::NativeHost;

use crate::register::{relay_service, settings_store};

/// Serve native messaging requests until stdin closes or Ctrl-C.
pub(crate) async fn run_relay(config: &Config) -> Result<(), Box<dyn std::error::Error>> {
    info!("Starting MindSpark relay v{}", env!("CARGO_PKG_VERSION"));
    let service = relay_service(config);
    for entry in service.context_menu() {
        info!(id = entry.id, title = entry.title, "Context menu entry");
    }

    let host = NativeHost::new(service);
    let shutdown = host.shutdown_token();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupted, cancelling outstanding requests");
            shutdown.cancel();
        }
    });

    host.run(tokio::io::stdin(), tokio::io::stdout()).await?;
    info!("MindSpark relay stopped");
    Ok(())
}

/// Send one request through an in-process relay and print the reply.
pub(crate) async fn ask(
    config: &Config,
    action: Option<String>,
    persona: Option<String>,
    text: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let settings = settings_store(config).load().await?;
    let api_key = settings.api_key.trim().to_string();

    let request = match action {
        Some(name) => {
            let action =
                ActionId::parse(&name).ok_or_else(|| format!("Unknown action: {}", name))?;
            RelayRequest::call_model(api_key, action.definition().build_prompt(text.trim()))
        }
        None => {
            let persona = match persona {
                Some(name) => {
                    Persona::parse(&name).ok_or_else(|| format!("Unknown persona: {}", name))?
                }
                None => settings.selected_persona,
            };
            RelayRequest::call_model(api_key, text)
                .with_system_instruction(persona.system_instruction())
        }
    };

    let (handle, task) = relay_service(config).spawn(8);
    let result = handle
        .call(request, CancellationToken::new())
        .await
        .and_then(RelayResponse::into_result);
    drop(handle);
    let _ = task.await;

    println!("{}", result?);
    Ok(())
}
