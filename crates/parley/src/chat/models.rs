//! Chat data models.

use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// Message sender.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The human side of the conversation.
    User,
    /// The model's reply (or the error text shown in its place).
    Ai,
}

impl std::fmt::Display for Sender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Sender::User => write!(f, "user"),
            Sender::Ai => write!(f, "ai"),
        }
    }
}

impl std::str::FromStr for Sender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "user" => Ok(Sender::User),
            "ai" => Ok(Sender::Ai),
            _ => Err(format!("unknown sender: {}", s)),
        }
    }
}

impl TryFrom<String> for Sender {
    type Error = String;

    fn try_from(s: String) -> Result<Self, Self::Error> {
        s.parse()
    }
}

/// A persisted chat message.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ChatMessage {
    pub id: i64,
    #[serde(skip_serializing)]
    pub user_id: String,
    #[sqlx(try_from = "String")]
    pub sender: Sender,
    pub text: String,
    /// Millisecond Unix timestamp.
    pub timestamp: i64,
}
