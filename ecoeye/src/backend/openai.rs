//! OpenAI-compatible chat-completions generator.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::client::BoxFuture;

use super::generator::{GeneratedText, GeneratorError, ReportGenerator, TokenUsage};

/// Default chat-completions endpoint.
const DEFAULT_ENDPOINT: &str = "https://api.openai.com/v1/chat/completions";

/// Default model used for report generation.
const DEFAULT_MODEL: &str = "gpt-4o";

/// Completion token budget per report.
const MAX_TOKENS: u32 = 1000;

/// Request timeout in seconds. Generation calls are slow; this bounds them
/// without racing typical completion latency.
const REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

#[derive(Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: u64,
    #[serde(default)]
    completion_tokens: u64,
}

#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    usage: Option<ChatUsage>,
}

/// Report generator backed by an OpenAI-compatible chat-completions API.
pub struct OpenAiGenerator {
    client: reqwest::Client,
    api_key: String,
    endpoint: String,
    model: String,
}

impl OpenAiGenerator {
    /// Creates a generator with the default endpoint and model.
    pub fn new(api_key: impl Into<String>) -> Result<Self, GeneratorError> {
        Self::with_endpoint(api_key, DEFAULT_ENDPOINT, DEFAULT_MODEL)
    }

    /// Creates a generator for a custom endpoint and model.
    pub fn with_endpoint(
        api_key: impl Into<String>,
        endpoint: impl Into<String>,
        model: impl Into<String>,
    ) -> Result<Self, GeneratorError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| GeneratorError::Request(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            endpoint: endpoint.into(),
            model: model.into(),
        })
    }
}

impl ReportGenerator for OpenAiGenerator {
    fn generate(&self, prompt: &str) -> BoxFuture<'_, Result<GeneratedText, GeneratorError>> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: prompt,
                },
                ChatMessage {
                    role: "user",
                    content: "Please create eco report",
                },
            ],
            max_tokens: MAX_TOKENS,
        };
        let request = self
            .client
            .post(&self.endpoint)
            .bearer_auth(&self.api_key)
            .json(&body);

        Box::pin(async move {
            let response = request
                .send()
                .await
                .map_err(|e| GeneratorError::Request(e.to_string()))?;

            if !response.status().is_success() {
                return Err(GeneratorError::Request(format!(
                    "HTTP {} from generation upstream",
                    response.status()
                )));
            }

            let parsed: ChatResponse = response
                .json()
                .await
                .map_err(|e| GeneratorError::Request(format!("undecodable response: {}", e)))?;

            let usage = parsed.usage.map(|u| TokenUsage {
                prompt_tokens: u.prompt_tokens,
                completion_tokens: u.completion_tokens,
            });

            let text = parsed
                .choices
                .into_iter()
                .next()
                .and_then(|c| c.message.content)
                .ok_or(GeneratorError::Empty)?;

            debug!(
                prompt_tokens = usage.map(|u| u.prompt_tokens).unwrap_or(0),
                completion_tokens = usage.map(|u| u.completion_tokens).unwrap_or(0),
                "Generation call completed"
            );

            Ok(GeneratedText { text, usage })
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_response_decodes() {
        let json = r#"{
            "choices": [{"message": {"content": "{\"tips\": {}}"}}],
            "usage": {"prompt_tokens": 250, "completion_tokens": 400}
        }"#;

        let parsed: ChatResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.choices.len(), 1);
        assert_eq!(parsed.usage.as_ref().map(|u| u.prompt_tokens), Some(250));
    }

    #[test]
    fn test_chat_response_without_usage() {
        let json = r#"{"choices": [{"message": {"content": "hi"}}]}"#;
        let parsed: ChatResponse = serde_json::from_str(json).unwrap();
        assert!(parsed.usage.is_none());
    }

    #[tokio::test]
    async fn test_unreachable_upstream_is_request_error() {
        let generator =
            OpenAiGenerator::with_endpoint("test-key", "http://127.0.0.1:9/v1/chat", "gpt-4o")
                .unwrap();
        let result = generator.generate("prompt").await;
        assert!(matches!(result, Err(GeneratorError::Request(_))));
    }
}
