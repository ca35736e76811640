//! Ollama client errors.

use thiserror::Error;

/// Errors from the Ollama client.
#[derive(Debug, Error)]
pub enum OllamaError {
    /// The model server could not be reached.
    #[error("Failed to communicate with Ollama API: {message}")]
    ConnectionFailed { url: String, message: String },

    /// The model server answered with a non-success status.
    #[error("Ollama API error: {message}")]
    Api { status: u16, message: String },

    /// The response body could not be decoded.
    #[error("failed to parse Ollama response: {0}")]
    Parse(String),
}

/// Result type for Ollama operations.
pub type OllamaResult<T> = Result<T, OllamaError>;

impl From<reqwest::Error> for OllamaError {
    fn from(err: reqwest::Error) -> Self {
        OllamaError::ConnectionFailed {
            url: err.url().map(|u| u.to_string()).unwrap_or_default(),
            message: err.to_string(),
        }
    }
}
