//! Ollama HTTP client.

use reqwest::Client;

use super::error::{OllamaError, OllamaResult};
use super::types::{GenerateRequest, GenerateResponse, ModelInfo, TagsResponse};

/// Client for communicating with an Ollama server.
#[derive(Debug, Clone)]
pub struct OllamaClient {
    /// HTTP client.
    client: Client,
    /// Base URL (e.g. "http://localhost:11434").
    base_url: String,
}

impl OllamaClient {
    /// Create a new Ollama client.
    ///
    /// No request timeout is applied; generation can legitimately take
    /// minutes on large prompts.
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = Client::builder()
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Get the base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Run a prompt through a model and return the generated text.
    pub async fn generate(&self, request: &GenerateRequest) -> OllamaResult<String> {
        let url = format!("{}/api/generate", self.base_url);
        let response = self.client.post(&url).json(request).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(OllamaError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| OllamaError::Parse(e.to_string()))?;

        Ok(body.response)
    }

    /// List the locally installed models.
    pub async fn list_models(&self) -> OllamaResult<Vec<ModelInfo>> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self.client.get(&url).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(OllamaError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: TagsResponse = response
            .json()
            .await
            .map_err(|e| OllamaError::Parse(e.to_string()))?;

        Ok(body.models)
    }
}
