//! # MindSpark Overlay
//!
//! The in-page half of MindSpark: watches the selection, shows a trigger
//! beside it, and renders action results in an accordion menu inside an
//! isolated root.
//!
//! [`OverlayController`] is the synchronous state machine. [`OverlayRuntime`]
//! drives it from an event channel and performs timers, relay calls and
//! clipboard writes.

pub mod controller;
pub mod event;
pub mod host;
pub mod menu;
pub mod panel;
pub mod runtime;
pub mod selection;
pub mod style;
pub mod view;

pub use controller::OverlayController;
pub use event::{Effect, Event, Ticket, TimerKind};
pub use host::{DocumentState, HostDocument, MemoryDocument, OverlayHost};
pub use menu::{ActionMenu, MenuState, Toggle};
pub use panel::{CopyState, PanelMetrics, ResultPanel, Truncation};
pub use runtime::{OverlayRuntime, SettingsLauncher};
pub use selection::SettleSource;
pub use view::{Trigger, ViewNode};
