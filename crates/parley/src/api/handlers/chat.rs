//! Chat handlers.

use axum::{Json, extract::State};
use serde::{Deserialize, Serialize};
use tracing::{info, instrument};

use crate::auth::CurrentUser;
use crate::chat::{ChatMessage, Sender};
use crate::ollama::{GenerateRequest, ModelInfo};

use super::MessageResponse;
use crate::api::error::{ApiError, ApiResult};
use crate::api::state::AppState;

/// Request body for sending a chat message.
#[derive(Debug, Deserialize)]
pub struct ChatMessageRequest {
    pub model: Option<String>,
    pub prompt: Option<String>,
}

/// Response for a chat message: the generated text.
#[derive(Debug, Serialize)]
pub struct ChatMessageResponse {
    pub response: String,
}

/// Response for a history read.
#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub messages: Vec<ChatMessage>,
}

/// Response for a model listing.
#[derive(Debug, Serialize)]
pub struct ModelsResponse {
    pub models: Vec<ModelInfo>,
}

/// Send a prompt to the model and record both sides of the exchange.
///
/// The user message is appended first; whatever comes back from the model
/// server, success or failure text, is appended as the `ai` message so the
/// stored history reflects exactly what the user saw.
#[instrument(skip(state, user, request), fields(user_id = %user.id()))]
pub async fn send_message(
    State(state): State<AppState>,
    user: CurrentUser,
    Json(request): Json<ChatMessageRequest>,
) -> ApiResult<Json<ChatMessageResponse>> {
    let prompt = request.prompt.as_deref().map(str::trim).unwrap_or_default();
    if prompt.is_empty() {
        // Rejected before the model server is contacted
        return Err(ApiError::bad_request("Prompt is required"));
    }

    state.chats.append(user.id(), Sender::User, prompt).await?;

    let generate = GenerateRequest::new(request.model.clone(), prompt);
    match state.ollama.generate(&generate).await {
        Ok(response) => {
            state.chats.append(user.id(), Sender::Ai, &response).await?;
            Ok(Json(ChatMessageResponse { response }))
        }
        Err(err) => {
            let failure_text = err.to_string();
            state
                .chats
                .append(user.id(), Sender::Ai, &failure_text)
                .await?;
            Err(err.into())
        }
    }
}

/// Get the caller's chat history.
///
/// An absent session is not an error; the list is simply empty.
pub async fn get_history(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<Json<HistoryResponse>> {
    let messages = state.chats.history(user.id()).await?;
    Ok(Json(HistoryResponse { messages }))
}

/// Delete the caller's chat history wholesale.
#[instrument(skip(state, user), fields(user_id = %user.id()))]
pub async fn clear_history(
    State(state): State<AppState>,
    user: CurrentUser,
) -> ApiResult<Json<MessageResponse>> {
    let cleared = state.chats.clear(user.id()).await?;
    if cleared == 0 {
        return Err(ApiError::not_found("Chat history not found"));
    }

    info!(cleared, "Cleared chat history");
    Ok(Json(MessageResponse {
        message: "Chat history cleared".to_string(),
    }))
}

/// List the models available on the model server.
pub async fn list_models(State(state): State<AppState>) -> ApiResult<Json<ModelsResponse>> {
    let models = state.ollama.list_models().await?;
    Ok(Json(ModelsResponse { models }))
}
