//! Offline provider used when mock mode is on.

use super::{CompletionProvider, ProviderError};
use async_trait::async_trait;

pub const MOCK_ANSWER_PREFIX: &str = "This is an automatic answer to your question: ";

/// Deterministic provider that never leaves the process.
#[derive(Debug, Default, Clone, Copy)]
pub struct MockCompletionProvider;

impl MockCompletionProvider {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CompletionProvider for MockCompletionProvider {
    fn name(&self) -> &'static str {
        "mock"
    }

    async fn complete(&self, question: &str) -> Result<String, ProviderError> {
        Ok(format!("{MOCK_ANSWER_PREFIX}{question}"))
    }
}
