//! HTTP handlers for the chat endpoints.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use tracing::info;

use crate::adapters::validation::RequestValidator;
use crate::application::{SendMessageCommand, SendMessageHandler};

use super::dto::{ChatResponse, ErrorResponse};

/// Application state for the chat endpoints.
#[derive(Clone)]
pub struct ChatAppState {
    /// Request body validator.
    pub validator: RequestValidator,
    /// The classify/orchestrate/synthesize pipeline.
    pub handler: Arc<SendMessageHandler>,
}

/// Serve one chat turn.
///
/// POST /api/chat
///
/// The body is taken as raw JSON so validation can report every violation
/// with its field path instead of failing on the first deserialization error.
pub async fn chat(
    State(state): State<ChatAppState>,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let input = match state.validator.validate_chat_request(&body) {
        Ok(input) => input,
        Err(errors) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(json!(ErrorResponse::validation(errors.violations))),
            );
        }
    };

    let request_id = uuid::Uuid::new_v4();
    info!(
        %request_id,
        history_len = input.history.len(),
        "serving chat request"
    );

    let result = state
        .handler
        .handle(SendMessageCommand {
            prompt: input.prompt,
            history: input.history,
        })
        .await;

    (
        StatusCode::OK,
        Json(json!(ChatResponse::from_result(request_id, result))),
    )
}

/// Liveness probe.
///
/// GET /health
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}
