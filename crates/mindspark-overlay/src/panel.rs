//! Result renderer: one panel per action card.

use mindspark_config::OverlayConfig;
use mindspark_protocols::{ActionId, ErrorKind, ModelError, Outcome};

use crate::event::{Event, Ticket};
use crate::view::{Trigger, ViewNode};

pub const PROCESSING_LABEL: &str = "Processing...";
pub const COPY_LABEL: &str = "Copy to clipboard";
pub const COPIED_LABEL: &str = "Copied!";
pub const SETTINGS_HINT: &str = "Set your API key in MindSpark settings.";

/// Display state of a long success text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Truncation {
    /// Fits within the collapsed height.
    Full,
    /// Clipped with a gradient mask and a show-more control.
    Truncated,
    /// Revealed after show-more. There is no way back.
    Expanded,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyState {
    Idle,
    Confirmed { generation: u64 },
}

/// Layout numbers used for the height estimate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PanelMetrics {
    pub collapsed_height_px: u32,
    pub truncation_slack_px: u32,
    pub line_height_px: u32,
    pub chars_per_line: usize,
}

impl From<&OverlayConfig> for PanelMetrics {
    fn from(config: &OverlayConfig) -> Self {
        Self {
            collapsed_height_px: config.collapsed_height_px,
            truncation_slack_px: config.truncation_slack_px,
            line_height_px: config.line_height_px,
            chars_per_line: config.chars_per_line,
        }
    }
}

impl Default for PanelMetrics {
    fn default() -> Self {
        Self::from(&OverlayConfig::default())
    }
}

impl PanelMetrics {
    /// Rendered height of `text` in pixels, assuming pre-wrap layout.
    pub fn estimate_height(&self, text: &str) -> u32 {
        let per_line = self.chars_per_line.max(1);
        let lines: usize = text
            .split('\n')
            .map(|line| line.chars().count().div_ceil(per_line).max(1))
            .sum();
        (lines as u32).saturating_mul(self.line_height_px)
    }

    pub fn needs_truncation(&self, text: &str) -> bool {
        self.estimate_height(text)
            > self
                .collapsed_height_px
                .saturating_add(self.truncation_slack_px)
    }
}

/// State of one action's result panel.
#[derive(Debug, Clone)]
pub struct ResultPanel {
    action: ActionId,
    open: bool,
    outcome: Option<Outcome>,
    ticket: Option<Ticket>,
    truncation: Truncation,
    copy: CopyState,
    copy_generation: u64,
}

impl ResultPanel {
    pub fn new(action: ActionId) -> Self {
        Self {
            action,
            open: false,
            outcome: None,
            ticket: None,
            truncation: Truncation::Full,
            copy: CopyState::Idle,
            copy_generation: 0,
        }
    }

    pub fn action(&self) -> ActionId {
        self.action
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn set_open(&mut self, open: bool) {
        self.open = open;
    }

    pub fn outcome(&self) -> Option<&Outcome> {
        self.outcome.as_ref()
    }

    pub fn truncation(&self) -> Truncation {
        self.truncation
    }

    pub fn copy_state(&self) -> CopyState {
        self.copy
    }

    /// The request this panel is waiting on.
    pub fn in_flight(&self) -> Option<Ticket> {
        self.ticket
    }

    /// Whether opening the panel should issue a request.
    ///
    /// Never-run and failed panels run; pending and successful ones do not.
    pub fn needs_run(&self) -> bool {
        matches!(self.outcome, None | Some(Outcome::Failure(_)))
    }

    /// Start waiting on `ticket`.
    pub fn begin(&mut self, ticket: Ticket) {
        self.outcome = Some(Outcome::Pending);
        self.ticket = Some(ticket);
        self.truncation = Truncation::Full;
        self.copy = CopyState::Idle;
    }

    /// Apply a completed request. Returns `false` for a ticket this panel is
    /// not waiting on.
    pub fn resolve(
        &mut self,
        ticket: Ticket,
        result: Result<String, ModelError>,
        metrics: &PanelMetrics,
    ) -> bool {
        if self.ticket != Some(ticket) {
            return false;
        }
        self.ticket = None;
        let outcome = Outcome::from_result(result);
        self.truncation = match &outcome {
            Outcome::Success(text) if metrics.needs_truncation(text) => Truncation::Truncated,
            _ => Truncation::Full,
        };
        self.outcome = Some(outcome);
        true
    }

    /// Reveal the full text. Returns `false` when there is nothing to reveal.
    pub fn expand(&mut self) -> bool {
        if self.truncation == Truncation::Truncated {
            self.truncation = Truncation::Expanded;
            true
        } else {
            false
        }
    }

    /// Enter the copy confirmation state.
    ///
    /// Returns the text to copy and the generation the revert timer must
    /// carry, or `None` when there is no success text.
    pub fn confirm_copy(&mut self) -> Option<(String, u64)> {
        let text = self.outcome.as_ref()?.text()?.to_string();
        self.copy_generation += 1;
        self.copy = CopyState::Confirmed {
            generation: self.copy_generation,
        };
        Some((text, self.copy_generation))
    }

    /// Revert the confirmation if `generation` is still current.
    pub fn revert_copy(&mut self, generation: u64) -> bool {
        if self.copy == (CopyState::Confirmed { generation }) {
            self.copy = CopyState::Idle;
            true
        } else {
            false
        }
    }

    /// Card body for this panel.
    pub fn view(&self, metrics: &PanelMetrics) -> ViewNode {
        let body = ViewNode::div("ms-card-body");
        if !self.open {
            return body.style("height", "0px");
        }

        match &self.outcome {
            None | Some(Outcome::Pending) => body.style("height", "auto").child(
                ViewNode::div("ms-processing")
                    .child(ViewNode::span("ms-dot"))
                    .child(ViewNode::span("ms-status-text").text(PROCESSING_LABEL)),
            ),
            Some(Outcome::Success(text)) => {
                let height = match self.truncation {
                    Truncation::Truncated => format!("{}px", metrics.collapsed_height_px),
                    _ => "auto".to_string(),
                };
                body.style("height", height).child(self.success_view(text))
            }
            Some(Outcome::Failure(failure)) => {
                let mut content = ViewNode::div("ms-content")
                    .child(ViewNode::div("ms-error").text(failure.message.clone()));
                if failure.kind == ErrorKind::MissingCredential {
                    content = content.child(
                        ViewNode::button("ms-link")
                            .text(SETTINGS_HINT)
                            .on(Trigger::Click, Event::SettingsClicked),
                    );
                }
                body.style("height", "auto").child(content)
            }
        }
    }

    fn success_view(&self, text: &str) -> ViewNode {
        let confirmed = matches!(self.copy, CopyState::Confirmed { .. });
        let copy = ViewNode::button("ms-icon-btn")
            .class("ms-copy")
            .class_if(confirmed, "ms-confirmed")
            .attr("title", if confirmed { COPIED_LABEL } else { COPY_LABEL })
            .on(Trigger::Click, Event::CopyClicked(self.action));

        let mut footer = ViewNode::div("ms-actions-bar").child(copy);
        if self.truncation == Truncation::Truncated {
            footer = footer.child(
                ViewNode::button("ms-expand-btn")
                    .attr("title", "Show more")
                    .on(Trigger::Click, Event::ShowMoreClicked(self.action)),
            );
        }

        ViewNode::div("ms-content")
            .class_if(self.truncation == Truncation::Truncated, "ms-truncated")
            .child(ViewNode::div("ms-text-block").text(text))
            .child(footer)
    }
}

#[cfg(test)]
#[path = "panel_tests.rs"]
mod tests;
