//! Popup errors.

use thiserror::Error;

use mindspark_protocols::StorageError;

#[derive(Debug, Error)]
pub enum PopupError {
    /// The settings form was submitted with a blank key.
    #[error("Please enter a valid key")]
    InvalidKey,

    #[error(transparent)]
    Storage(#[from] StorageError),
}
