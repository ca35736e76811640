//! Repository for chat history database operations.

use anyhow::{Context, Result};
use chrono::Utc;
use sqlx::SqlitePool;

use super::models::{ChatMessage, Sender};

/// Repository for chat history operations.
#[derive(Debug, Clone)]
pub struct ChatRepository {
    pool: SqlitePool,
}

impl ChatRepository {
    /// Create a new repository instance.
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Append a message to a user's chat session.
    pub async fn append(&self, user_id: &str, sender: Sender, text: &str) -> Result<ChatMessage> {
        let timestamp = Utc::now().timestamp_millis();

        let id = sqlx::query_scalar::<_, i64>(
            r#"
            INSERT INTO chat_messages (user_id, sender, text, timestamp)
            VALUES (?, ?, ?, ?)
            RETURNING id
            "#,
        )
        .bind(user_id)
        .bind(sender.to_string())
        .bind(text)
        .bind(timestamp)
        .fetch_one(&self.pool)
        .await
        .context("inserting chat message")?;

        self.get_by_id(id).await
    }

    /// Get a message by ID.
    pub async fn get_by_id(&self, id: i64) -> Result<ChatMessage> {
        sqlx::query_as::<_, ChatMessage>(
            "SELECT id, user_id, sender, text, timestamp FROM chat_messages WHERE id = ?",
        )
        .bind(id)
        .fetch_one(&self.pool)
        .await
        .context("fetching chat message")
    }

    /// Get a user's full chat history, oldest first.
    ///
    /// An absent session is not an error: the result is simply empty.
    pub async fn history(&self, user_id: &str) -> Result<Vec<ChatMessage>> {
        sqlx::query_as::<_, ChatMessage>(
            r#"
            SELECT id, user_id, sender, text, timestamp
            FROM chat_messages
            WHERE user_id = ?
            ORDER BY timestamp ASC, id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await
        .context("fetching chat history")
    }

    /// Delete a user's chat session wholesale.
    ///
    /// Returns the number of deleted messages; zero means there was no
    /// session to clear.
    pub async fn clear(&self, user_id: &str) -> Result<i64> {
        let result = sqlx::query("DELETE FROM chat_messages WHERE user_id = ?")
            .bind(user_id)
            .execute(&self.pool)
            .await
            .context("clearing chat history")?;

        Ok(result.rows_affected() as i64)
    }
}
