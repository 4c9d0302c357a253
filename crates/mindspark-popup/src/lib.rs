//! # MindSpark Popup
//!
//! Chat panel controller: settings form, persona choice, transcript and
//! page quick actions. All model calls go through a
//! [`ModelRelay`](mindspark_protocols::ModelRelay).

pub mod controller;
pub mod error;
pub mod page;
pub mod quick;
pub mod transcript;

pub use controller::{PendingTurn, PopupController, PopupState, SettingsForm, KEY_REQUIRED, KEY_SAVED};
pub use error::PopupError;
pub use page::FilePage;
pub use quick::{QuickAction, PAGE_UNREADABLE};
pub use transcript::{PendingId, Transcript, TranscriptEntry, THINKING_LABEL};
