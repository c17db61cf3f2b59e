use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use validator::Validate;

use crate::error::ChatError;
use crate::models::{ChatRequest, ChatResponse};
use crate::startup::AppState;

/// Answer a question through the configured completion provider.
///
/// Unparseable bodies are reported like a missing question.
#[tracing::instrument(skip(state, payload))]
pub async fn chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ChatResponse>, ChatError> {
    let Json(request) = payload.map_err(|rejection| {
        tracing::debug!(error = %rejection, "Rejected chat request body");
        ChatError::InvalidQuestion
    })?;

    request.validate().map_err(|e| {
        tracing::debug!(error = %e, "Chat request failed validation");
        ChatError::InvalidQuestion
    })?;

    let provider = state.completion_provider().ok_or(ChatError::MissingApiKey)?;

    // Failures are logged once, when the error is rendered.
    let answer = provider.complete(&request.question).await?;

    tracing::info!(
        provider = provider.name(),
        answer_len = answer.len(),
        "Answered chat request"
    );

    Ok(Json(ChatResponse { answer }))
}
