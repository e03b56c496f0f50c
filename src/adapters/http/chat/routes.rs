//! Axum routes for the chat endpoints.

use axum::routing::{get, post};
use axum::Router;

use super::handlers::{chat, health, ChatAppState};

/// Creates routes for the chat endpoints.
///
/// - POST /chat - one chat turn
pub fn chat_routes() -> Router<ChatAppState> {
    Router::new().route("/chat", post(chat))
}

/// Combined router: chat under /api, plus the liveness probe.
pub fn chat_router() -> Router<ChatAppState> {
    Router::new()
        .nest("/api", chat_routes())
        .route("/health", get(health))
}
