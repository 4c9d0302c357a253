//! Overlay preview: drives the selection overlay against an in-memory page.

use std::sync::Arc;
use std::time::Duration;

use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use mindspark_config::Config;
use mindspark_overlay::{Event, MemoryDocument, OverlayRuntime};
use mindspark_protocols::{ActionId, RawSelection, SelectionRect};

use crate::adapters::{NoClipboard, SettingsHint};
use crate::register::{relay_service, settings_store};

const POLL_INTERVAL: Duration = Duration::from_millis(50);

pub(crate) async fn run_preview(
    config: &Config,
    action: String,
    text: String,
) -> Result<(), Box<dyn std::error::Error>> {
    let action = ActionId::parse(&action).ok_or_else(|| format!("Unknown action: {}", action))?;

    let (handle, relay_task) = relay_service(config).spawn(8);
    let doc = MemoryDocument::new();
    doc.set_selection(Some(RawSelection::new(
        text,
        SelectionRect::new(200.0, 120.0, 320.0, 20.0),
    )));

    let runtime = OverlayRuntime::new(
        doc.clone(),
        config.overlay.clone(),
        Arc::new(handle),
        Arc::new(settings_store(config)),
        Arc::new(NoClipboard),
        Arc::new(SettingsHint),
    );
    let events = runtime.sender();
    let shutdown = CancellationToken::new();
    let overlay = tokio::spawn(runtime.run(shutdown.clone()));

    events.send(Event::PointerUp { in_overlay: false })?;
    tokio::time::sleep(Duration::from_millis(config.overlay.settle_delay_ms) + POLL_INTERVAL).await;

    if doc.content().is_some() {
        events.send(Event::TriggerEnter)?;
        events.send(Event::ActionClicked(action))?;

        let deadline = Instant::now() + Duration::from_secs(config.model.timeout_seconds + 5);
        loop {
            tokio::time::sleep(POLL_INTERVAL).await;
            let done = doc.content().is_some_and(|v| v.find("ms-content").is_some());
            if done || Instant::now() >= deadline {
                break;
            }
        }
        if let Some(view) = doc.content() {
            println!("{}", view.to_html());
        }
    } else {
        debug!("Selection did not produce an overlay");
        println!("Selection too short to show the overlay.");
    }

    shutdown.cancel();
    overlay.await?;
    let _ = relay_task.await;
    Ok(())
}
