use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

use crate::api::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub reply: String,
    pub turns: usize,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub transcript: String,
    pub turns: usize,
}

/// Single question/answer exchange. Generation failures surface as a normal
/// reply string, so this handler only errors on malformed input.
pub async fn chat_handler(
    State(state): State<AppState>,
    Json(request): Json<ChatRequest>,
) -> Result<Json<ChatResponse>, StatusCode> {
    if request.message.trim().is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let reply = state.session.respond(&request.message).await;

    let turns = state.session.turn_count().map_err(|e| {
        tracing::error!(error = %e, "Failed to read history");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(ChatResponse { reply, turns }))
}

/// Running transcript of the session, for chat-style consumers.
pub async fn get_history(
    State(state): State<AppState>,
) -> Result<Json<HistoryResponse>, StatusCode> {
    let transcript = state.session.transcript().map_err(|e| {
        tracing::error!(error = %e, "Failed to read history");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;
    let turns = state.session.turn_count().map_err(|e| {
        tracing::error!(error = %e, "Failed to read history");
        StatusCode::INTERNAL_SERVER_ERROR
    })?;

    Ok(Json(HistoryResponse { transcript, turns }))
}
