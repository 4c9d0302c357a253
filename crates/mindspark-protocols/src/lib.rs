//! # MindSpark Protocols
//!
//! Shared definitions for the MindSpark components.
//! Contains only interface definitions - no implementations.
//!
//! ## Core Traits
//!
//! - [`ModelClient`] - Performs one upstream generation call
//! - [`ModelRelay`] - Message channel to the privileged relay
//! - [`SettingsStore`] - Persistence of the API key and persona
//! - [`PageContent`] - Reads the visible text of the active page
//! - [`Clipboard`] - Writes copied result text

pub mod error;
pub mod model;
pub mod page;
pub mod relay;
pub mod storage;
pub mod types;

pub use error::{ClipboardError, ErrorKind, ModelError, PageError, StorageError};
pub use model::{GenerateRequest, ModelClient};
pub use page::{Clipboard, PageContent};
pub use relay::{CALL_GEMINI, CALL_MODEL, ModelRelay, RelayRequest, RelayResponse};
pub use storage::SettingsStore;
pub use types::*;

// Re-export CancellationToken for convenience
pub use tokio_util::sync::CancellationToken;
