//! Error types shared across MindSpark components.

mod model;
mod page;
mod storage;

pub use model::*;
pub use page::*;
pub use storage::*;
