//! Request/response types for the Ollama HTTP API.

use serde::{Deserialize, Serialize};

/// Model used when a chat request does not name one.
pub const DEFAULT_MODEL: &str = "llama2";

/// Request body for `POST /api/generate`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    /// Always false: the full response is returned at once.
    pub stream: bool,
}

impl GenerateRequest {
    /// Build a generate request, falling back to [`DEFAULT_MODEL`].
    pub fn new(model: Option<String>, prompt: impl Into<String>) -> Self {
        let model = model
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_MODEL.to_string());

        Self {
            model,
            prompt: prompt.into(),
            stream: false,
        }
    }
}

/// Response body from `POST /api/generate`.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    pub response: String,
}

/// A locally installed model, as reported by `GET /api/tags`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
}

/// Response body from `GET /api/tags`.
#[derive(Debug, Deserialize)]
pub struct TagsResponse {
    #[serde(default)]
    pub models: Vec<ModelInfo>,
}
