//! Selection watcher rules.

use std::time::Duration;

use mindspark_config::OverlayConfig;
use mindspark_protocols::{RawSelection, SelectionSnapshot};

/// Keys whose release may have extended a keyboard selection.
pub const SELECTION_KEYS: [&str; 3] = ["Shift", "ArrowLeft", "ArrowRight"];

/// What prompted a selection read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettleSource {
    Pointer,
    Keyboard,
}

impl SettleSource {
    pub fn delay(&self, config: &OverlayConfig) -> Duration {
        match self {
            SettleSource::Pointer => Duration::from_millis(config.settle_delay_ms),
            SettleSource::Keyboard => Duration::from_millis(config.keyboard_settle_delay_ms),
        }
    }
}

pub fn is_selection_key(key: &str) -> bool {
    SELECTION_KEYS.contains(&key)
}

/// Turn a raw page selection into a snapshot.
///
/// Returns `None` when the trimmed text is shorter than
/// `min_selection_chars`, which callers treat the same as no selection.
pub fn snapshot(raw: &RawSelection, config: &OverlayConfig) -> Option<SelectionSnapshot> {
    let text = raw.text.trim();
    if text.is_empty() || text.chars().count() < config.min_selection_chars {
        return None;
    }

    let (anchor_x, anchor_y) = anchor(raw, config);
    Some(SelectionSnapshot {
        text: text.to_string(),
        anchor_x,
        anchor_y,
    })
}

/// Trigger position in page coordinates: centered above the selection.
pub fn anchor(raw: &RawSelection, config: &OverlayConfig) -> (f64, f64) {
    let rect = &raw.rect;
    let x = rect.left + raw.scroll_x + rect.width / 2.0;
    let y = rect.top + raw.scroll_y - config.trigger_offset_y;
    (x, y)
}
