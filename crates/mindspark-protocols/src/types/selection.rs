//! Selection geometry as read from the host page.

use serde::{Deserialize, Serialize};

/// Bounding rectangle of a selection range in viewport coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SelectionRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl SelectionRect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// The page's current selection, untrimmed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawSelection {
    pub text: String,
    pub rect: SelectionRect,
    pub scroll_x: f64,
    pub scroll_y: f64,
}

impl RawSelection {
    pub fn new(text: impl Into<String>, rect: SelectionRect) -> Self {
        Self {
            text: text.into(),
            rect,
            scroll_x: 0.0,
            scroll_y: 0.0,
        }
    }

    pub fn with_scroll(mut self, scroll_x: f64, scroll_y: f64) -> Self {
        self.scroll_x = scroll_x;
        self.scroll_y = scroll_y;
        self
    }
}

/// A non-empty, trimmed selection anchored in page coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectionSnapshot {
    pub text: String,
    pub anchor_x: f64,
    pub anchor_y: f64,
}
