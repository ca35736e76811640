//! HTTP request handlers.

mod admin;
mod auth;
mod chat;

pub use admin::*;
pub use auth::*;
pub use chat::*;

use axum::Json;
use serde::Serialize;

/// Simple message response body.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}
