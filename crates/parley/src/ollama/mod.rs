//! Ollama HTTP client.
//!
//! Thin client for the external model-serving API: text generation and
//! the installed-model listing. Not part of this backend's core; failures
//! are reported to the caller, never retried.

mod client;
mod error;
mod types;

pub use client::OllamaClient;
pub use error::{OllamaError, OllamaResult};
pub use types::{DEFAULT_MODEL, GenerateRequest, GenerateResponse, ModelInfo};
