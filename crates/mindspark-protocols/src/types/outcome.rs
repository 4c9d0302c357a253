//! Result of one action invocation.

use serde::{Deserialize, Serialize};

use crate::error::{ErrorKind, ModelError};

/// A failure as rendered in a result panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Failure {
    pub kind: ErrorKind,
    pub message: String,
}

impl From<&ModelError> for Failure {
    fn from(err: &ModelError) -> Self {
        Self {
            kind: err.kind(),
            message: err.user_message(),
        }
    }
}

/// Tagged outcome owned by a result panel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "state", content = "value", rename_all = "camelCase")]
pub enum Outcome {
    Pending,
    Success(String),
    Failure(Failure),
}

impl Outcome {
    pub fn from_result(result: Result<String, ModelError>) -> Self {
        match result {
            Ok(text) => Outcome::Success(text),
            Err(err) => Outcome::Failure(Failure::from(&err)),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Outcome::Pending)
    }

    pub fn text(&self) -> Option<&str> {
        match self {
            Outcome::Success(text) => Some(text),
            _ => None,
        }
    }
}
