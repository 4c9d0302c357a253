//! Controller inputs and outputs.

use std::time::Duration;

use mindspark_protocols::{ActionId, ContextMenuInvocation, ModelError};

use crate::selection::SettleSource;

/// Identifies one dispatched model request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Ticket(pub u64);

/// Timers the controller schedules through the runtime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// Read the selection once the platform has finalized it.
    Settle(SettleSource),
    /// Close the menu after the pointer has left it.
    HoverGrace,
    /// Revert a copy confirmation.
    CopyRevert(ActionId),
}

/// Everything that can happen to the overlay.
#[derive(Debug, Clone, PartialEq)]
pub enum Event {
    PointerDown { in_overlay: bool },
    PointerUp { in_overlay: bool },
    KeyUp { key: String },
    TriggerEnter,
    TriggerLeave,
    TriggerClicked,
    MenuEnter,
    MenuLeave,
    ActionClicked(ActionId),
    CopyClicked(ActionId),
    ShowMoreClicked(ActionId),
    SettingsClicked,
    ContextMenu(ContextMenuInvocation),
    TimerFired { timer: TimerKind, generation: u64 },
    RelayCompleted {
        ticket: Ticket,
        result: Result<String, ModelError>,
    },
    /// Tear the overlay down unconditionally.
    Dismiss,
}

/// Side effects the controller asks its runtime to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    ScheduleTimer {
        timer: TimerKind,
        generation: u64,
        delay: Duration,
    },
    DispatchModel { ticket: Ticket, prompt: String },
    CancelRequest { ticket: Ticket },
    WriteClipboard { text: String },
    OpenSettings,
}
