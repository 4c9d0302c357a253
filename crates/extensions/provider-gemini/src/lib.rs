//! # MindSpark Provider - Gemini
//!
//! Client for the Gemini `generateContent` endpoint.

mod client;
mod types;

pub use client::{DEFAULT_BASE_URL, DEFAULT_MODEL, GeminiClient};
pub use types::*;
