//! Common types used across MindSpark.

mod action;
mod chat;
mod outcome;
mod persona;
mod selection;
mod settings;

pub use action::*;
pub use chat::*;
pub use outcome::*;
pub use persona::*;
pub use selection::*;
pub use settings::*;
