//! Completion provider abstractions and implementations.
//!
//! The chat handler only sees [`CompletionProvider`]; startup picks the mock
//! or the OpenAI-backed implementation from configuration.

pub mod mock;
pub mod openai;

use async_trait::async_trait;
use thiserror::Error;

pub use mock::MockCompletionProvider;
pub use openai::{OpenAiCompletionProvider, OpenAiConfig};

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Failed to build HTTP client: {0}")]
    Client(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("API error {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Rate limited")]
    RateLimited,

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Response contained no answer")]
    EmptyResponse,
}

/// Turns a single question into a single answer.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    async fn complete(&self, question: &str) -> Result<String, ProviderError>;
}
