use axum::response::{IntoResponse, Response};
use service_core::error::AppError;
use thiserror::Error;

use crate::services::ProviderError;

pub const INVALID_QUESTION_MESSAGE: &str = "question is required and must not be empty";
pub const MISSING_API_KEY_MESSAGE: &str = "LLM API key is not configured";

/// Failures of a single `/chat` request.
#[derive(Debug, Error)]
pub enum ChatError {
    #[error("{}", INVALID_QUESTION_MESSAGE)]
    InvalidQuestion,

    #[error("{}", MISSING_API_KEY_MESSAGE)]
    MissingApiKey,

    #[error("Completion provider failed: {0}")]
    Upstream(#[from] ProviderError),
}

impl From<ChatError> for AppError {
    fn from(err: ChatError) -> Self {
        match err {
            ChatError::InvalidQuestion => AppError::BadRequest(anyhow::anyhow!(err)),
            ChatError::MissingApiKey => AppError::ConfigError(anyhow::anyhow!(err)),
            ChatError::Upstream(_) => AppError::InternalError(anyhow::Error::new(err)),
        }
    }
}

impl IntoResponse for ChatError {
    fn into_response(self) -> Response {
        AppError::from(self).into_response()
    }
}
