//! Action menu and accordion state.

use mindspark_config::OverlayConfig;
use mindspark_protocols::{ActionId, SelectionSnapshot};

use crate::event::{Event, Ticket};
use crate::panel::{PanelMetrics, ResultPanel};
use crate::view::{Trigger, ViewNode};

pub const PRODUCT_NAME: &str = "MindSpark AI";

/// Visible state of the menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuState {
    /// Only the trigger is shown.
    Collapsed,
    /// The action list is shown with every panel closed.
    MenuOpen,
    /// One action's panel is open.
    ActionExpanded(ActionId),
}

/// Result of toggling an action card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    /// The panel opened. `needs_run` is set when it has no usable result.
    Expanded { needs_run: bool },
    /// The panel was open and is now closed.
    Collapsed,
}

/// The menu shown for one selection.
#[derive(Debug, Clone)]
pub struct ActionMenu {
    selection: SelectionSnapshot,
    state: MenuState,
    panels: Vec<ResultPanel>,
}

impl ActionMenu {
    pub fn new(selection: SelectionSnapshot) -> Self {
        Self {
            selection,
            state: MenuState::Collapsed,
            panels: ActionId::ALL.into_iter().map(ResultPanel::new).collect(),
        }
    }

    pub fn selection(&self) -> &SelectionSnapshot {
        &self.selection
    }

    pub fn state(&self) -> MenuState {
        self.state
    }

    /// The interaction lock: held while any panel is open.
    pub fn is_locked(&self) -> bool {
        self.panels.iter().any(ResultPanel::is_open)
    }

    pub fn panel(&self, action: ActionId) -> Option<&ResultPanel> {
        self.panels.iter().find(|p| p.action() == action)
    }

    pub fn panel_mut(&mut self, action: ActionId) -> Option<&mut ResultPanel> {
        self.panels.iter_mut().find(|p| p.action() == action)
    }

    /// The panel waiting on `ticket`.
    pub fn panel_for_ticket(&mut self, ticket: Ticket) -> Option<&mut ResultPanel> {
        self.panels
            .iter_mut()
            .find(|p| p.in_flight() == Some(ticket))
    }

    /// Tickets of every request still outstanding.
    pub fn in_flight(&self) -> Vec<Ticket> {
        self.panels.iter().filter_map(ResultPanel::in_flight).collect()
    }

    /// `Collapsed -> MenuOpen`. Returns `true` if the state changed.
    pub fn open(&mut self) -> bool {
        if self.state == MenuState::Collapsed {
            self.state = MenuState::MenuOpen;
            true
        } else {
            false
        }
    }

    /// `MenuOpen -> Collapsed`. Refused while the lock is held.
    pub fn collapse(&mut self) -> bool {
        if self.state == MenuState::MenuOpen && !self.is_locked() {
            self.state = MenuState::Collapsed;
            true
        } else {
            false
        }
    }

    /// Open `action`'s panel, closing any other.
    pub fn expand(&mut self, action: ActionId) -> Toggle {
        for panel in &mut self.panels {
            panel.set_open(panel.action() == action);
        }
        self.state = MenuState::ActionExpanded(action);
        let needs_run = self.panel(action).is_some_and(ResultPanel::needs_run);
        Toggle::Expanded { needs_run }
    }

    /// Card header click: close the panel if open, otherwise expand it.
    pub fn toggle(&mut self, action: ActionId) -> Toggle {
        if !self.panel(action).is_some_and(ResultPanel::is_open) {
            return self.expand(action);
        }
        if let Some(panel) = self.panel_mut(action) {
            panel.set_open(false);
        }
        self.state = MenuState::MenuOpen;
        Toggle::Collapsed
    }

    pub fn view(&self, config: &OverlayConfig, metrics: &PanelMetrics) -> ViewNode {
        let x = self.selection.anchor_x;
        let y = self.selection.anchor_y;

        let trigger = ViewNode::button("ms-float-btn")
            .attr("title", PRODUCT_NAME)
            .style("left", px(x))
            .style("top", px(y))
            .text("\u{2728}")
            .on(Trigger::PointerEnter, Event::TriggerEnter)
            .on(Trigger::PointerLeave, Event::TriggerLeave)
            .on(Trigger::Click, Event::TriggerClicked);

        let header = ViewNode::div("ms-header")
            .child(ViewNode::span("ms-logo").text(PRODUCT_NAME))
            .child(
                ViewNode::button("ms-icon-settings")
                    .attr("title", "Settings")
                    .text("\u{2699}")
                    .on(Trigger::Click, Event::SettingsClicked),
            );

        let display = if self.state == MenuState::Collapsed {
            "none"
        } else {
            "flex"
        };
        let menu = ViewNode::div("ms-menu")
            .style("display", display)
            .style("left", px(x))
            .style("top", px(y + config.menu_offset_y))
            .on(Trigger::PointerEnter, Event::MenuEnter)
            .on(Trigger::PointerLeave, Event::MenuLeave)
            .child(header)
            .children(self.panels.iter().map(|panel| card(panel, metrics)));

        ViewNode::div("ms-container").child(trigger).child(menu)
    }
}

fn card(panel: &ResultPanel, metrics: &PanelMetrics) -> ViewNode {
    let definition = panel.action().definition();
    let mut header = ViewNode::button("ms-card-header")
        .on(Trigger::Click, Event::ActionClicked(panel.action()))
        .child(ViewNode::span("ms-card-title").text(definition.label));
    if let Some(shortcut) = definition.shortcut {
        header = header.child(ViewNode::span("ms-shortcut").text(shortcut));
    }

    ViewNode::div("ms-card")
        .class_if(panel.is_open(), "ms-active")
        .attr("data-action", panel.action().as_str())
        .child(header)
        .child(panel.view(metrics))
}

fn px(value: f64) -> String {
    format!("{}px", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu() -> ActionMenu {
        ActionMenu::new(SelectionSnapshot {
            text: "some selected text".to_string(),
            anchor_x: 140.0,
            anchor_y: 150.0,
        })
    }

    #[test]
    fn test_new_menu_is_collapsed_and_unlocked() {
        let menu = menu();
        assert_eq!(menu.state(), MenuState::Collapsed);
        assert!(!menu.is_locked());
        assert!(menu.in_flight().is_empty());
    }

    #[test]
    fn test_open_then_collapse() {
        let mut menu = menu();
        assert!(menu.open());
        assert!(!menu.open());
        assert_eq!(menu.state(), MenuState::MenuOpen);
        assert!(menu.collapse());
        assert_eq!(menu.state(), MenuState::Collapsed);
    }

    #[test]
    fn test_expand_takes_lock_and_blocks_collapse() {
        let mut menu = menu();
        menu.open();
        assert_eq!(
            menu.toggle(ActionId::Explain),
            Toggle::Expanded { needs_run: true }
        );
        assert_eq!(menu.state(), MenuState::ActionExpanded(ActionId::Explain));
        assert!(menu.is_locked());
        assert!(!menu.collapse());
    }

    #[test]
    fn test_accordion_keeps_one_panel_open() {
        let mut menu = menu();
        menu.toggle(ActionId::Summarize);
        menu.toggle(ActionId::Translate);

        let open: Vec<_> = ActionId::ALL
            .into_iter()
            .filter(|id| menu.panel(*id).unwrap().is_open())
            .collect();
        assert_eq!(open, vec![ActionId::Translate]);
    }

    #[test]
    fn test_reclick_releases_lock() {
        let mut menu = menu();
        menu.toggle(ActionId::Summarize);
        assert_eq!(menu.toggle(ActionId::Summarize), Toggle::Collapsed);
        assert_eq!(menu.state(), MenuState::MenuOpen);
        assert!(!menu.is_locked());
    }

    #[test]
    fn test_pending_panel_does_not_rerun_on_reopen() {
        let mut menu = menu();
        menu.toggle(ActionId::Summarize);
        menu.panel_mut(ActionId::Summarize).unwrap().begin(Ticket(1));
        menu.toggle(ActionId::Summarize);

        assert_eq!(
            menu.toggle(ActionId::Summarize),
            Toggle::Expanded { needs_run: false }
        );
        assert_eq!(menu.in_flight(), vec![Ticket(1)]);
        assert!(menu.panel_for_ticket(Ticket(1)).is_some());
    }

    #[test]
    fn test_view_positions_trigger_and_menu() {
        let menu = menu();
        let config = OverlayConfig::default();
        let view = menu.view(&config, &PanelMetrics::from(&config));

        let trigger = view.find("ms-float-btn").unwrap();
        assert_eq!(trigger.style_value("left"), Some("140px"));
        assert_eq!(trigger.style_value("top"), Some("150px"));

        let panel = view.find("ms-menu").unwrap();
        assert_eq!(panel.style_value("display"), Some("none"));
        assert_eq!(panel.style_value("top"), Some("195px"));
        assert_eq!(view.find_all("ms-card").len(), 4);
    }

    #[test]
    fn test_view_lists_actions_in_order() {
        let mut menu = menu();
        menu.open();
        let config = OverlayConfig::default();
        let view = menu.view(&config, &PanelMetrics::from(&config));

        let titles: Vec<_> = view
            .find_all("ms-card-title")
            .into_iter()
            .map(|n| n.text_content())
            .collect();
        assert_eq!(
            titles,
            vec![
                "Summarize Selection",
                "Explain Selection",
                "Fix Grammar",
                "Translate Selection"
            ]
        );
        assert_eq!(view.find("ms-menu").unwrap().style_value("display"), Some("flex"));
        assert_eq!(view.find_all("ms-shortcut").len(), 3);
        assert_eq!(
            view.find("ms-icon-settings").unwrap().handler(Trigger::Click),
            Some(&Event::SettingsClicked)
        );
    }
}
