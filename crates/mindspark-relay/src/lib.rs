//! # MindSpark Relay
//!
//! The privileged side of MindSpark. UI contexts hand it a
//! [`RelayRequest`](mindspark_protocols::RelayRequest) and wait for exactly
//! one [`RelayResponse`](mindspark_protocols::RelayResponse).
//!
//! - [`RelayService`] validates requests and calls the model with a deadline.
//! - [`RelayHandle`] is a cloneable in-process channel to a spawned service.
//! - [`NativeHost`] serves the service over length-prefixed stdio frames.

mod error;
mod handle;
mod native;
mod service;

#[cfg(test)]
mod testing;

pub use error::RelayError;
pub use handle::RelayHandle;
pub use native::{read_frame, write_frame, NativeHost, MAX_INCOMING_FRAME, MAX_OUTGOING_FRAME};
pub use service::{RelayService, DEFAULT_SYSTEM_INSTRUCTION, DEFAULT_TIMEOUT_SECS};
