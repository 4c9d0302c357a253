//! # MindSpark Config
//!
//! Runtime configuration (`mindspark.toml`) and the persisted settings store.

mod error;
mod loader;
mod schema;
mod store;
mod validator;

pub use error::ConfigError;
pub use loader::ConfigLoader;
pub use schema::*;
pub use store::{MemorySettingsStore, SettingsFileStore};
pub use validator::{ConfigValidator, ValidationError, ValidationResult, ValidationWarning};
