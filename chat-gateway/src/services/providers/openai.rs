//! OpenAI chat-completion provider.
//!
//! Sends the question as a single user message to `{api_base}/chat/completions`
//! and returns the content of the first choice. Any further choices are ignored.

use super::{CompletionProvider, ProviderError};
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, Secret};
use serde::{Deserialize, Serialize};

/// OpenAI provider configuration.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: Secret<String>,
    pub model: String,
    pub api_base: String,
}

/// Live provider backed by the OpenAI HTTP API.
pub struct OpenAiCompletionProvider {
    config: OpenAiConfig,
    client: Client,
}

impl OpenAiCompletionProvider {
    /// No request timeout is set; a stalled upstream holds its request open.
    pub fn new(config: OpenAiConfig) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .user_agent(concat!("chat-gateway/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ProviderError::Client(e.to_string()))?;

        Ok(Self { config, client })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.config.api_base)
    }
}

#[async_trait]
impl CompletionProvider for OpenAiCompletionProvider {
    fn name(&self) -> &'static str {
        "openai"
    }

    async fn complete(&self, question: &str) -> Result<String, ProviderError> {
        let request = ChatCompletionRequest {
            model: &self.config.model,
            messages: vec![ChatMessage {
                role: "user",
                content: question,
            }],
        };

        tracing::debug!(
            model = %self.config.model,
            question_len = question.len(),
            "Sending request to OpenAI API"
        );

        let response = self
            .client
            .post(self.completions_url())
            .bearer_auth(self.config.api_key.expose_secret())
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            if status == StatusCode::TOO_MANY_REQUESTS {
                return Err(ProviderError::RateLimited);
            }

            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let completion: ChatCompletionResponse = response
            .json()
            .await
            .map_err(|e| ProviderError::MalformedResponse(e.to_string()))?;

        completion
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(ProviderError::EmptyResponse)
    }
}

// OpenAI API types

#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ResponseMessage,
}

#[derive(Debug, Deserialize)]
struct ResponseMessage {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider(api_base: &str) -> OpenAiCompletionProvider {
        OpenAiCompletionProvider::new(OpenAiConfig {
            api_key: Secret::new("sk-test".to_string()),
            model: "gpt-3.5-turbo".to_string(),
            api_base: api_base.to_string(),
        })
        .unwrap()
    }

    #[test]
    fn completions_url_appends_path() {
        assert_eq!(
            provider("https://api.openai.com/v1").completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
        assert_eq!(
            provider("http://127.0.0.1:9000").completions_url(),
            "http://127.0.0.1:9000/chat/completions"
        );
    }

    #[test]
    fn request_body_has_single_user_message() {
        let request = ChatCompletionRequest {
            model: "gpt-3.5-turbo",
            messages: vec![ChatMessage {
                role: "user",
                content: "hi",
            }],
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "model": "gpt-3.5-turbo",
                "messages": [{ "role": "user", "content": "hi" }]
            })
        );
    }

    #[test]
    fn response_parsing_keeps_first_choice_only() {
        let parsed: ChatCompletionResponse = serde_json::from_str(
            r#"{"id":"x","choices":[{"index":0,"message":{"role":"assistant","content":"first"}},{"index":1,"message":{"role":"assistant","content":"second"}}]}"#,
        )
        .unwrap();
        let first = parsed.choices.into_iter().next().unwrap();
        assert_eq!(first.message.content.as_deref(), Some("first"));
    }

    #[tokio::test]
    async fn unreachable_endpoint_is_network_error() {
        let err = provider("http://127.0.0.1:1").complete("hi").await.unwrap_err();
        assert!(matches!(err, ProviderError::Network(_)));
    }
}
