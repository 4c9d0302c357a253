//! Async driver for [`OverlayController`].
//!
//! Serializes every event through one task, so controller state is only
//! touched from a single place. Timers, model calls and clipboard writes run
//! as spawned tasks that report back through the event channel.

use std::collections::HashMap;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use mindspark_config::OverlayConfig;
use mindspark_protocols::{Clipboard, ModelError, ModelRelay, RelayRequest, SettingsStore};

use crate::controller::OverlayController;
use crate::event::{Effect, Event, Ticket};
use crate::host::HostDocument;

/// Opens the settings surface (the popup in a browser).
pub trait SettingsLauncher: Send + Sync {
    fn open_settings(&self);
}

pub struct OverlayRuntime<D> {
    controller: OverlayController<D>,
    relay: Arc<dyn ModelRelay>,
    settings: Arc<dyn SettingsStore>,
    clipboard: Arc<dyn Clipboard>,
    launcher: Arc<dyn SettingsLauncher>,
    events_tx: mpsc::UnboundedSender<Event>,
    events_rx: mpsc::UnboundedReceiver<Event>,
    in_flight: HashMap<Ticket, CancellationToken>,
}

impl<D: HostDocument + 'static> OverlayRuntime<D> {
    pub fn new(
        document: D,
        config: OverlayConfig,
        relay: Arc<dyn ModelRelay>,
        settings: Arc<dyn SettingsStore>,
        clipboard: Arc<dyn Clipboard>,
        launcher: Arc<dyn SettingsLauncher>,
    ) -> Self {
        let (events_tx, events_rx) = mpsc::unbounded_channel();
        Self {
            controller: OverlayController::new(document, config),
            relay,
            settings,
            clipboard,
            launcher,
            events_tx,
            events_rx,
            in_flight: HashMap::new(),
        }
    }

    /// Sender for page events.
    pub fn sender(&self) -> mpsc::UnboundedSender<Event> {
        self.events_tx.clone()
    }

    pub fn controller(&self) -> &OverlayController<D> {
        &self.controller
    }

    /// Process events until `shutdown` fires. The overlay is dismissed on
    /// the way out.
    pub async fn run(mut self, shutdown: CancellationToken) {
        info!("Overlay runtime started");
        loop {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => {
                    self.process(Event::Dismiss);
                    break;
                }
                event = self.events_rx.recv() => match event {
                    Some(event) => self.process(event),
                    None => break,
                },
            }
        }
        info!("Overlay runtime stopped");
    }

    /// Apply one event and perform the resulting effects.
    pub fn process(&mut self, event: Event) {
        if let Event::RelayCompleted { ticket, .. } = &event {
            self.in_flight.remove(ticket);
        }
        for effect in self.controller.handle(event) {
            self.apply(effect);
        }
    }

    fn apply(&mut self, effect: Effect) {
        match effect {
            Effect::ScheduleTimer {
                timer,
                generation,
                delay,
            } => {
                let tx = self.events_tx.clone();
                tokio::spawn(async move {
                    tokio::time::sleep(delay).await;
                    let _ = tx.send(Event::TimerFired { timer, generation });
                });
            }
            Effect::DispatchModel { ticket, prompt } => {
                let cancel = CancellationToken::new();
                self.in_flight.insert(ticket, cancel.clone());
                let relay = Arc::clone(&self.relay);
                let settings = Arc::clone(&self.settings);
                let tx = self.events_tx.clone();
                tokio::spawn(async move {
                    let result = request(relay.as_ref(), settings.as_ref(), prompt, cancel).await;
                    let _ = tx.send(Event::RelayCompleted { ticket, result });
                });
            }
            Effect::CancelRequest { ticket } => {
                if let Some(cancel) = self.in_flight.remove(&ticket) {
                    debug!(ticket = ticket.0, "Cancelling request");
                    cancel.cancel();
                }
            }
            Effect::WriteClipboard { text } => {
                let clipboard = Arc::clone(&self.clipboard);
                tokio::spawn(async move {
                    if let Err(e) = clipboard.write_text(&text).await {
                        warn!(error = %e, "Clipboard write failed");
                    }
                });
            }
            Effect::OpenSettings => self.launcher.open_settings(),
        }
    }
}

/// Read the key and send one model call through the relay.
///
/// An empty key fails without touching the relay.
async fn request(
    relay: &dyn ModelRelay,
    settings: &dyn SettingsStore,
    prompt: String,
    cancel: CancellationToken,
) -> Result<String, ModelError> {
    let api_key = settings
        .api_key()
        .await
        .map_err(|e| ModelError::TransportFailure(e.to_string()))?;
    if api_key.trim().is_empty() {
        return Err(ModelError::missing_credential());
    }

    let request = RelayRequest::call_model(api_key, prompt);
    relay.call(request, cancel).await?.into_result()
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use mindspark_config::MemorySettingsStore;
    use mindspark_protocols::{
        ActionId, ClipboardError, RawSelection, RelayResponse, SelectionRect, Settings,
    };

    use super::*;
    use crate::host::MemoryDocument;

    #[derive(Default)]
    struct StubRelay {
        requests: Mutex<Vec<RelayRequest>>,
        delay: Option<Duration>,
    }

    impl StubRelay {
        fn slow(delay: Duration) -> Self {
            Self {
                delay: Some(delay),
                ..Self::default()
            }
        }

        fn requests(&self) -> Vec<RelayRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl ModelRelay for StubRelay {
        async fn call(
            &self,
            request: RelayRequest,
            cancel: CancellationToken,
        ) -> Result<RelayResponse, ModelError> {
            self.requests.lock().unwrap().push(request.clone());
            if let Some(delay) = self.delay {
                tokio::select! {
                    _ = cancel.cancelled() => return Err(ModelError::Cancelled),
                    _ = tokio::time::sleep(delay) => {}
                }
            }
            Ok(RelayResponse::ok(format!("reply to {}", request.prompt.len())))
        }
    }

    #[derive(Default)]
    struct RecordingClipboard {
        writes: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl Clipboard for RecordingClipboard {
        async fn write_text(&self, text: &str) -> Result<(), ClipboardError> {
            self.writes.lock().unwrap().push(text.to_string());
            Ok(())
        }
    }

    #[derive(Default)]
    struct RecordingLauncher {
        opened: Mutex<usize>,
    }

    impl SettingsLauncher for RecordingLauncher {
        fn open_settings(&self) {
            *self.opened.lock().unwrap() += 1;
        }
    }

    struct Harness {
        doc: MemoryDocument,
        relay: Arc<StubRelay>,
        clipboard: Arc<RecordingClipboard>,
        launcher: Arc<RecordingLauncher>,
        tx: mpsc::UnboundedSender<Event>,
        shutdown: CancellationToken,
        task: tokio::task::JoinHandle<()>,
    }

    impl Harness {
        fn start(api_key: &str, relay: StubRelay) -> Self {
            let doc = MemoryDocument::new();
            let relay = Arc::new(relay);
            let clipboard = Arc::new(RecordingClipboard::default());
            let launcher = Arc::new(RecordingLauncher::default());
            let settings = Arc::new(MemorySettingsStore::new(Settings::new(
                api_key,
                Default::default(),
            )));

            let runtime = OverlayRuntime::new(
                doc.clone(),
                OverlayConfig::default(),
                relay.clone(),
                settings,
                clipboard.clone(),
                launcher.clone(),
            );
            let tx = runtime.sender();
            let shutdown = CancellationToken::new();
            let task = tokio::spawn(runtime.run(shutdown.clone()));
            Self {
                doc,
                relay,
                clipboard,
                launcher,
                tx,
                shutdown,
                task,
            }
        }

        fn send(&self, event: Event) {
            self.tx.send(event).unwrap();
        }

        async fn select(&self, text: &str) {
            self.doc.set_selection(Some(RawSelection::new(
                text,
                SelectionRect::new(10.0, 300.0, 100.0, 18.0),
            )));
            self.send(Event::PointerUp { in_overlay: false });
            settle(Duration::from_millis(100)).await;
        }

        fn text_block(&self) -> Option<String> {
            self.doc
                .content()?
                .find("ms-text-block")
                .and_then(|n| n.text.clone())
        }

        fn error_text(&self) -> Option<String> {
            self.doc
                .content()?
                .find("ms-error")
                .and_then(|n| n.text.clone())
        }
    }

    async fn settle(duration: Duration) {
        tokio::time::sleep(duration).await;
    }

    #[tokio::test(start_paused = true)]
    async fn test_action_round_trip() {
        let harness = Harness::start("key-1", StubRelay::default());
        harness.select("hello world").await;
        assert_eq!(harness.doc.container_count(), 1);

        harness.send(Event::ActionClicked(ActionId::Summarize));
        settle(Duration::from_millis(10)).await;

        let requests = harness.relay.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].api_key, "key-1");
        assert!(requests[0].is_model_call());
        assert!(requests[0].prompt.ends_with("\"hello world\""));
        assert!(harness.text_block().unwrap().starts_with("reply to"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_missing_key_skips_relay() {
        let harness = Harness::start("   ", StubRelay::default());
        harness.select("hello world").await;

        harness.send(Event::ActionClicked(ActionId::Explain));
        settle(Duration::from_millis(10)).await;

        assert!(harness.relay.requests().is_empty());
        assert_eq!(harness.error_text().as_deref(), Some("API Key missing"));
    }

    #[tokio::test(start_paused = true)]
    async fn test_dismiss_cancels_in_flight_request() {
        let harness = Harness::start("key", StubRelay::slow(Duration::from_secs(5)));
        harness.select("hello world").await;
        harness.send(Event::ActionClicked(ActionId::Summarize));
        settle(Duration::from_millis(10)).await;

        harness.send(Event::Dismiss);
        settle(Duration::from_secs(10)).await;

        assert_eq!(harness.relay.requests().len(), 1);
        assert_eq!(harness.doc.container_count(), 0);
        assert!(harness.doc.content().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_copy_writes_clipboard_and_reverts() {
        let harness = Harness::start("key", StubRelay::default());
        harness.select("hello world").await;
        harness.send(Event::ActionClicked(ActionId::Translate));
        settle(Duration::from_millis(10)).await;

        harness.send(Event::CopyClicked(ActionId::Translate));
        settle(Duration::from_millis(10)).await;
        let copied = harness.clipboard.writes.lock().unwrap().clone();
        assert_eq!(copied, vec![harness.text_block().unwrap()]);
        let content = harness.doc.content().unwrap();
        assert!(content.find("ms-confirmed").is_some());

        settle(Duration::from_millis(2100)).await;
        let content = harness.doc.content().unwrap();
        assert!(content.find("ms-confirmed").is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn test_settings_click_opens_launcher() {
        let harness = Harness::start("", StubRelay::default());
        harness.select("hello world").await;
        harness.send(Event::SettingsClicked);
        settle(Duration::from_millis(10)).await;

        assert_eq!(*harness.launcher.opened.lock().unwrap(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_shutdown_dismisses_overlay() {
        let harness = Harness::start("key", StubRelay::default());
        harness.select("hello world").await;
        assert_eq!(harness.doc.container_count(), 1);

        harness.shutdown.cancel();
        harness.task.await.unwrap();
        assert_eq!(harness.doc.container_count(), 0);
    }
}
