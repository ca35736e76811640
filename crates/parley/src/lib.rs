//! Parley Backend Library
//!
//! This library provides the core components for the Parley chat backend:
//! user accounts with hashed passwords and roles, stateless session tokens,
//! per-user chat history, and the HTTP API that ties them to a locally
//! hosted Ollama model server.

pub mod api;
pub mod auth;
pub mod chat;
pub mod db;
pub mod ollama;
pub mod user;
