//! Per-user chat history.
//!
//! Each user has at most one chat session: the ordered sequence of
//! messages they exchanged with the model. Created lazily on first
//! message, deleted wholesale on clear.

mod models;
mod repository;

pub use models::{ChatMessage, Sender};
pub use repository::ChatRepository;
