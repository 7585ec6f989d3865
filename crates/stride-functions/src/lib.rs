//! # stride-functions
//!
//! The HTTP service behind the two generation functions. Each request is
//! checked against the schema registry, turned into a prompt, sent to the
//! hosted model, and the model's text is checked again before it is
//! returned. Every failure is answered with `400 {"error": ...}`.

pub mod error;
pub mod gemini;
mod handlers;
pub mod prompts;
pub mod routes;

pub use error::FunctionError;
pub use gemini::{GeminiClient, TextModel};
pub use routes::{AppState, router};
