//! Popup chat controller.

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use mindspark_config::PopupConfig;
use mindspark_protocols::{
    ChatMessage, ModelError, ModelRelay, PageContent, Persona, RelayRequest, Settings,
    SettingsStore,
};

use crate::error::PopupError;
use crate::quick::{context_prompt, truncate_chars, QuickAction, PAGE_UNREADABLE};
use crate::transcript::{PendingId, Transcript};

pub const KEY_SAVED: &str = "API Key saved! Ready to help.";
pub const KEY_REQUIRED: &str = "Please set your API Key in settings first.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupState {
    /// No API key on record.
    Unconfigured,
    /// A key is saved and chat is available.
    Ready,
}

/// Contents of the settings form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsForm {
    pub api_key: String,
    pub persona: Persona,
    /// Validation message from the last save attempt.
    pub error: Option<String>,
}

impl SettingsForm {
    fn from_settings(settings: &Settings) -> Self {
        Self {
            api_key: settings.api_key.clone(),
            persona: settings.selected_persona,
            error: None,
        }
    }
}

/// A chat turn whose loading entry is on screen and whose request has not
/// been answered yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingTurn {
    pub id: PendingId,
    pub request: RelayRequest,
}

pub struct PopupController {
    relay: Arc<dyn ModelRelay>,
    store: Arc<dyn SettingsStore>,
    page: Arc<dyn PageContent>,
    config: PopupConfig,
    settings: Settings,
    form: SettingsForm,
    settings_open: bool,
    transcript: Transcript,
    input: String,
    pending: Option<PendingId>,
    shutdown: CancellationToken,
}

impl PopupController {
    /// Load stored settings and open the popup. Without a key the settings
    /// form is shown first.
    pub async fn open(
        relay: Arc<dyn ModelRelay>,
        store: Arc<dyn SettingsStore>,
        page: Arc<dyn PageContent>,
        config: PopupConfig,
    ) -> Result<Self, PopupError> {
        let settings = store.load().await?;
        let settings_open = !settings.has_api_key();
        debug!(configured = !settings_open, "Popup opened");

        Ok(Self {
            relay,
            store,
            page,
            config,
            form: SettingsForm::from_settings(&settings),
            settings,
            settings_open,
            transcript: Transcript::new(),
            input: String::new(),
            pending: None,
            shutdown: CancellationToken::new(),
        })
    }

    pub fn state(&self) -> PopupState {
        if self.settings.has_api_key() {
            PopupState::Ready
        } else {
            PopupState::Unconfigured
        }
    }

    pub fn is_settings_open(&self) -> bool {
        self.settings_open
    }

    pub fn form(&self) -> &SettingsForm {
        &self.form
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn persona(&self) -> Persona {
        self.settings.selected_persona
    }

    /// Whether a chat turn is waiting on its reply.
    pub fn is_busy(&self) -> bool {
        self.pending.is_some()
    }

    pub fn open_settings(&mut self) {
        self.form = SettingsForm::from_settings(&self.settings);
        self.settings_open = true;
    }

    /// Close the form without saving. Refused while no key is on record.
    pub fn cancel_settings(&mut self) -> bool {
        if self.state() == PopupState::Unconfigured {
            return false;
        }
        self.settings_open = false;
        true
    }

    pub fn set_key_input(&mut self, key: impl Into<String>) {
        self.form.api_key = key.into();
        self.form.error = None;
    }

    pub fn set_form_persona(&mut self, persona: Persona) {
        self.form.persona = persona;
    }

    /// Validate and persist the settings form.
    pub async fn save_settings(&mut self) -> Result<(), PopupError> {
        let key = self.form.api_key.trim();
        if key.is_empty() {
            self.form.error = Some(PopupError::InvalidKey.to_string());
            return Err(PopupError::InvalidKey);
        }

        let settings = Settings::new(key, self.form.persona);
        self.store.save(&settings).await?;
        info!(persona = settings.selected_persona.display_name(), "Settings saved");

        self.form = SettingsForm::from_settings(&settings);
        self.settings = settings;
        self.settings_open = false;
        self.transcript.push(ChatMessage::model(KEY_SAVED));
        Ok(())
    }

    /// Switch persona for later turns. Persisted once a key exists.
    pub async fn select_persona(&mut self, persona: Persona) -> Result<(), PopupError> {
        self.settings.selected_persona = persona;
        self.form.persona = persona;
        if self.settings.has_api_key() {
            self.store.save(&self.settings).await?;
        }
        debug!(persona = persona.display_name(), "Persona selected");
        Ok(())
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Send the input box as a chat turn.
    ///
    /// Blank input is ignored, and so is a send while another turn is
    /// pending; the input is kept in that case.
    pub async fn send(&mut self) {
        if self.input.trim().is_empty() || self.is_busy() {
            return;
        }
        let text = std::mem::take(&mut self.input);
        if let Some(turn) = self.begin_turn(&text, None) {
            self.run_turn(turn).await;
        }
    }

    /// Run a quick action.
    pub async fn quick_action(&mut self, action: QuickAction) {
        if let Some(prefill) = action.prefill() {
            self.input = prefill.to_string();
            return;
        }
        let Some(instruction) = action.page_instruction() else {
            return;
        };
        if self.is_busy() || self.is_closed() {
            return;
        }
        if self.state() == PopupState::Unconfigured {
            self.open_settings();
            return;
        }

        let page_text = match self.page.visible_text().await {
            Ok(text) if !text.trim().is_empty() => text,
            Ok(_) => {
                self.transcript.push(ChatMessage::model(PAGE_UNREADABLE));
                return;
            }
            Err(e) => {
                warn!(error = %e, "Page read failed");
                self.transcript.push(ChatMessage::model(PAGE_UNREADABLE));
                return;
            }
        };

        let context = truncate_chars(&page_text, self.config.page_context_limit);
        if let Some(turn) = self.begin_turn(instruction, Some(context)) {
            self.run_turn(turn).await;
        }
    }

    /// Append the user's message and a loading entry, and build the request.
    ///
    /// Returns `None` when nothing should be sent: blank text, a closed
    /// popup, a turn already pending, or no key on record (the user is sent
    /// to settings).
    pub fn begin_turn(&mut self, text: &str, context: Option<&str>) -> Option<PendingTurn> {
        let text = text.trim();
        if text.is_empty() {
            return None;
        }
        if self.is_closed() {
            debug!("Send refused after close");
            return None;
        }
        if self.is_busy() {
            debug!("Send refused while a turn is pending");
            return None;
        }

        self.transcript.push(ChatMessage::user(text));
        if !self.settings.has_api_key() {
            self.require_key();
            return None;
        }

        let prompt = match context {
            Some(context) => context_prompt(context, text),
            None => text.to_string(),
        };
        let request = RelayRequest::call_model(self.settings.api_key.trim(), prompt)
            .with_system_instruction(self.settings.selected_persona.system_instruction());

        let id = self.transcript.push_pending();
        self.pending = Some(id);
        Some(PendingTurn { id, request })
    }

    /// Replace the loading entry `id` with the reply or an error line.
    pub fn complete_turn(&mut self, id: PendingId, result: Result<String, ModelError>) -> bool {
        if self.pending != Some(id) {
            return false;
        }
        self.pending = None;

        match result {
            Ok(text) => {
                self.transcript.resolve(id, ChatMessage::model(text));
            }
            Err(ModelError::Cancelled) => {
                self.transcript.remove_pending(id);
            }
            Err(ModelError::MissingCredential(_)) => {
                self.transcript.resolve(id, ChatMessage::model(KEY_REQUIRED));
                self.open_settings();
            }
            Err(e) => {
                info!(kind = ?e.kind(), "Chat turn failed");
                let line = format!("Error: {}", e.user_message());
                self.transcript.resolve(id, ChatMessage::model(line));
            }
        }
        true
    }

    /// Cancel any outstanding request. Called when the popup closes.
    ///
    /// No further turns are started afterwards.
    pub fn close(&self) {
        self.shutdown.cancel();
    }

    pub fn is_closed(&self) -> bool {
        self.shutdown.is_cancelled()
    }

    /// Token cancelled by [`close`](Self::close). A driver that awaits
    /// [`send`](Self::send) can cancel it from elsewhere to abandon the
    /// in-flight turn.
    pub fn shutdown_token(&self) -> CancellationToken {
        self.shutdown.clone()
    }

    async fn run_turn(&mut self, turn: PendingTurn) {
        let cancel = self.shutdown.child_token();
        let result = match self.relay.call(turn.request, cancel).await {
            Ok(response) => response.into_result(),
            Err(e) => Err(e),
        };
        self.complete_turn(turn.id, result);
    }

    fn require_key(&mut self) {
        self.transcript.push(ChatMessage::model(KEY_REQUIRED));
        self.open_settings();
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
