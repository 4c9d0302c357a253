//! Overlay controller.
//!
//! Owns the lifecycle of one page's overlay. Events go in, the view is
//! re-rendered synchronously, and any asynchronous work comes back out as
//! [`Effect`]s for the runtime to perform.

use std::time::Duration;

use tracing::{debug, info};

use mindspark_config::OverlayConfig;
use mindspark_protocols::{ActionId, ContextMenuInvocation, ModelError, SelectionSnapshot};

use crate::event::{Effect, Event, Ticket, TimerKind};
use crate::host::{HostDocument, OverlayHost};
use crate::menu::{ActionMenu, MenuState, Toggle};
use crate::panel::PanelMetrics;
use crate::selection::{self, SettleSource};

pub struct OverlayController<D> {
    host: OverlayHost<D>,
    config: OverlayConfig,
    metrics: PanelMetrics,
    menu: Option<ActionMenu>,
    settle_generation: u64,
    hover_generation: u64,
    next_ticket: u64,
    last_anchor: Option<(f64, f64)>,
}

impl<D: HostDocument> OverlayController<D> {
    pub fn new(document: D, config: OverlayConfig) -> Self {
        let metrics = PanelMetrics::from(&config);
        Self {
            host: OverlayHost::new(document),
            config,
            metrics,
            menu: None,
            settle_generation: 0,
            hover_generation: 0,
            next_ticket: 0,
            last_anchor: None,
        }
    }

    pub fn config(&self) -> &OverlayConfig {
        &self.config
    }

    pub fn host(&self) -> &OverlayHost<D> {
        &self.host
    }

    pub fn menu(&self) -> Option<&ActionMenu> {
        self.menu.as_ref()
    }

    pub fn is_locked(&self) -> bool {
        self.menu.as_ref().is_some_and(ActionMenu::is_locked)
    }

    /// Apply one event.
    pub fn handle(&mut self, event: Event) -> Vec<Effect> {
        match event {
            Event::PointerDown { in_overlay } => self.on_pointer_down(in_overlay),
            Event::PointerUp { in_overlay: true } => Vec::new(),
            Event::PointerUp { in_overlay: false } => self.schedule_settle(SettleSource::Pointer),
            Event::KeyUp { key } if selection::is_selection_key(&key) => {
                self.schedule_settle(SettleSource::Keyboard)
            }
            Event::KeyUp { .. } => Vec::new(),
            Event::TriggerEnter | Event::MenuEnter | Event::TriggerClicked => {
                self.on_hover_enter();
                Vec::new()
            }
            Event::TriggerLeave | Event::MenuLeave => self.on_hover_leave(),
            Event::ActionClicked(action) => self.on_action_clicked(action),
            Event::CopyClicked(action) => self.on_copy(action),
            Event::ShowMoreClicked(action) => {
                let expanded = self
                    .menu
                    .as_mut()
                    .and_then(|m| m.panel_mut(action))
                    .is_some_and(|p| p.expand());
                if expanded {
                    self.render();
                }
                Vec::new()
            }
            Event::SettingsClicked => vec![Effect::OpenSettings],
            Event::ContextMenu(invocation) => self.on_context_menu(invocation),
            Event::TimerFired { timer, generation } => self.on_timer(timer, generation),
            Event::RelayCompleted { ticket, result } => {
                self.on_relay_completed(ticket, result);
                Vec::new()
            }
            Event::Dismiss => self.teardown(),
        }
    }

    fn on_pointer_down(&mut self, in_overlay: bool) -> Vec<Effect> {
        if in_overlay || self.menu.is_none() {
            return Vec::new();
        }
        if self.is_locked() {
            debug!("Outside click ignored while a panel is open");
            return Vec::new();
        }
        self.teardown()
    }

    fn schedule_settle(&mut self, source: SettleSource) -> Vec<Effect> {
        self.settle_generation += 1;
        vec![Effect::ScheduleTimer {
            timer: TimerKind::Settle(source),
            generation: self.settle_generation,
            delay: source.delay(&self.config),
        }]
    }

    fn on_timer(&mut self, timer: TimerKind, generation: u64) -> Vec<Effect> {
        match timer {
            TimerKind::Settle(_) if generation == self.settle_generation => self.on_settled(),
            TimerKind::HoverGrace if generation == self.hover_generation => {
                let collapsed = self.menu.as_mut().is_some_and(ActionMenu::collapse);
                if collapsed {
                    self.render();
                }
                Vec::new()
            }
            TimerKind::CopyRevert(action) => {
                let reverted = self
                    .menu
                    .as_mut()
                    .and_then(|m| m.panel_mut(action))
                    .is_some_and(|p| p.revert_copy(generation));
                if reverted {
                    self.render();
                }
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    /// Read the finalized selection and show, keep or dismiss the overlay.
    fn on_settled(&mut self) -> Vec<Effect> {
        let snapshot = self
            .host
            .current_selection()
            .and_then(|raw| selection::snapshot(&raw, &self.config));

        if self.is_locked() {
            if snapshot.is_some() {
                debug!("New selection ignored while a panel is open");
            }
            return Vec::new();
        }

        let Some(snapshot) = snapshot else {
            return self.teardown();
        };

        let effects = self.teardown();
        debug!(
            chars = snapshot.text.chars().count(),
            "Showing overlay for selection"
        );
        self.show(snapshot);
        effects
    }

    fn show(&mut self, snapshot: SelectionSnapshot) {
        self.last_anchor = Some((snapshot.anchor_x, snapshot.anchor_y));
        self.menu = Some(ActionMenu::new(snapshot));
        self.render();
    }

    fn on_hover_enter(&mut self) {
        let Some(menu) = self.menu.as_mut() else {
            return;
        };
        self.hover_generation += 1;
        if menu.open() {
            self.render();
        }
    }

    fn on_hover_leave(&mut self) -> Vec<Effect> {
        match &self.menu {
            Some(menu) if menu.state() == MenuState::MenuOpen && !menu.is_locked() => {}
            _ => return Vec::new(),
        }
        self.hover_generation += 1;
        vec![Effect::ScheduleTimer {
            timer: TimerKind::HoverGrace,
            generation: self.hover_generation,
            delay: Duration::from_millis(self.config.hover_grace_ms),
        }]
    }

    fn on_action_clicked(&mut self, action: ActionId) -> Vec<Effect> {
        let Some(menu) = self.menu.as_mut() else {
            return Vec::new();
        };
        let effects = match menu.toggle(action) {
            Toggle::Expanded { needs_run: true } => self.dispatch(action).into_iter().collect(),
            _ => Vec::new(),
        };
        self.render();
        effects
    }

    fn on_copy(&mut self, action: ActionId) -> Vec<Effect> {
        let Some((text, generation)) = self
            .menu
            .as_mut()
            .and_then(|m| m.panel_mut(action))
            .and_then(|p| p.confirm_copy())
        else {
            return Vec::new();
        };
        self.render();
        vec![
            Effect::WriteClipboard { text },
            Effect::ScheduleTimer {
                timer: TimerKind::CopyRevert(action),
                generation,
                delay: Duration::from_millis(self.config.copy_confirm_ms),
            },
        ]
    }

    /// Open a fresh menu for a context-menu click and expand its action.
    ///
    /// This replaces whatever overlay is showing, lock or not.
    fn on_context_menu(&mut self, invocation: ContextMenuInvocation) -> Vec<Effect> {
        let text = invocation.selection_text.trim();
        if text.is_empty() {
            return Vec::new();
        }

        let (anchor_x, anchor_y) = self
            .host
            .current_selection()
            .map(|raw| selection::anchor(&raw, &self.config))
            .or(self.last_anchor)
            .unwrap_or((0.0, 0.0));
        let snapshot = SelectionSnapshot {
            text: text.to_string(),
            anchor_x,
            anchor_y,
        };

        let mut effects = self.teardown();
        info!(action = %invocation.action, "Context menu invocation");
        self.last_anchor = Some((anchor_x, anchor_y));
        let mut menu = ActionMenu::new(snapshot);
        menu.open();
        let toggle = menu.expand(invocation.action);
        self.menu = Some(menu);
        if toggle == (Toggle::Expanded { needs_run: true }) {
            effects.extend(self.dispatch(invocation.action));
        }
        self.render();
        effects
    }

    fn on_relay_completed(&mut self, ticket: Ticket, result: Result<String, ModelError>) {
        if result.as_ref().is_err_and(ModelError::is_cancelled) {
            debug!(ticket = ticket.0, "Cancelled request completed");
            return;
        }
        let Some(menu) = self.menu.as_mut() else {
            debug!(ticket = ticket.0, "Dropping result for a dismissed overlay");
            return;
        };
        let Some(panel) = menu.panel_for_ticket(ticket) else {
            debug!(ticket = ticket.0, "Dropping result for a retired request");
            return;
        };
        match &result {
            Ok(text) => debug!(action = %panel.action(), chars = text.len(), "Result received"),
            Err(e) => info!(action = %panel.action(), kind = ?e.kind(), "Action failed"),
        }
        panel.resolve(ticket, result, &self.metrics);
        self.render();
    }

    fn dispatch(&mut self, action: ActionId) -> Option<Effect> {
        let menu = self.menu.as_mut()?;
        let prompt = action.definition().build_prompt(&menu.selection().text);
        self.next_ticket += 1;
        let ticket = Ticket(self.next_ticket);
        menu.panel_mut(action)?.begin(ticket);
        debug!(action = %action, ticket = ticket.0, "Dispatching action");
        Some(Effect::DispatchModel { ticket, prompt })
    }

    /// Destroy the overlay. Outstanding requests are cancelled when
    /// configured to.
    fn teardown(&mut self) -> Vec<Effect> {
        self.hover_generation += 1;
        let Some(menu) = self.menu.take() else {
            return Vec::new();
        };
        self.host.unmount();
        debug!("Overlay dismissed");

        if !self.config.cancel_on_dismiss {
            return Vec::new();
        }
        menu.in_flight()
            .into_iter()
            .map(|ticket| Effect::CancelRequest { ticket })
            .collect()
    }

    fn render(&mut self) {
        if let Some(menu) = &self.menu {
            let view = menu.view(&self.config, &self.metrics);
            self.host.mount(&view);
        }
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
