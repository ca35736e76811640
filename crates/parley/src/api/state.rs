//! Application state shared across handlers.

use std::sync::Arc;

use crate::auth::AuthState;
use crate::chat::ChatRepository;
use crate::ollama::OllamaClient;
use crate::user::UserService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// User service for the credential store.
    pub users: Arc<UserService>,
    /// Per-user chat history.
    pub chats: Arc<ChatRepository>,
    /// Authentication state (token issue/verify).
    pub auth: AuthState,
    /// Client for the external model-serving API.
    pub ollama: Arc<OllamaClient>,
}

impl AppState {
    /// Create new application state.
    pub fn new(
        users: UserService,
        chats: ChatRepository,
        auth: AuthState,
        ollama: OllamaClient,
    ) -> Self {
        Self {
            users: Arc::new(users),
            chats: Arc::new(chats),
            auth,
            ollama: Arc::new(ollama),
        }
    }
}
