/// LLM Client: the single point of entry for all completion-service calls in BrandPulse.
///
/// ARCHITECTURAL RULE: No other module may call the Groq API directly.
/// All LLM interactions MUST go through `CompletionService`.
///
/// Model: mistral-saba-24b (hardcoded per deployment)
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

const GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
/// The model used for all completion calls.
pub const MODEL: &str = "mistral-saba-24b";
pub const TEMPERATURE: f64 = 0.7;
pub const MAX_TOKENS: u32 = 1000;
const REQUEST_TIMEOUT_SECS: u64 = 120;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Outcome of one completion call. Never partially populated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationResult {
    Success(String),
    Failure(String),
}

impl GenerationResult {
    pub fn is_success(&self) -> bool {
        matches!(self, GenerationResult::Success(_))
    }

    /// Generated text, or the failure message in its place.
    pub fn into_text(self) -> String {
        match self {
            GenerationResult::Success(text) | GenerationResult::Failure(text) => text,
        }
    }
}

/// Abstraction over the hosted text-generation backend.
///
/// Implementations must never propagate a fault: every error comes back
/// as `GenerationResult::Failure`.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, prompt: &str) -> GenerationResult;
}

/// Wire body for one single-turn generation request. Model parameters are fixed.
#[derive(Debug, Serialize)]
pub struct GenerationRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 1],
    temperature: f64,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

impl<'a> GenerationRequest<'a> {
    pub fn new(prompt: &'a str) -> Self {
        Self {
            model: MODEL,
            messages: [ChatMessage {
                role: "user",
                content: prompt,
            }],
            temperature: TEMPERATURE,
            max_tokens: MAX_TOKENS,
        }
    }
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<Choice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct Usage {
    prompt_tokens: u32,
    completion_tokens: u32,
}

impl ChatCompletionResponse {
    /// Extracts the content of the first choice.
    fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
            .filter(|t| !t.trim().is_empty())
    }
}

#[derive(Debug, Deserialize)]
struct GroqError {
    error: GroqErrorBody,
}

#[derive(Debug, Deserialize)]
struct GroqErrorBody {
    message: String,
}

/// Pulls the human-readable message out of an error body, falling back to the raw body.
fn api_error_message(body: String) -> String {
    serde_json::from_str::<GroqError>(&body)
        .map(|e| e.error.message)
        .unwrap_or(body)
}

/// The single completion client shared by every analysis run.
/// Immutable after construction; safe to reuse across sequential calls.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_key: String) -> Result<Self, LlmError> {
        Ok(Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()?,
            api_key,
        })
    }

    /// Makes exactly one call to the completion endpoint. No retry.
    pub async fn call(&self, prompt: &str) -> Result<String, LlmError> {
        let response = self
            .client
            .post(GROQ_API_URL)
            .bearer_auth(&self.api_key)
            .json(&GenerationRequest::new(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LlmError::Api {
                status: status.as_u16(),
                message: api_error_message(body),
            });
        }

        let completion: ChatCompletionResponse = response.json().await?;

        if let Some(usage) = &completion.usage {
            debug!(
                "LLM call succeeded: prompt_tokens={}, completion_tokens={}",
                usage.prompt_tokens, usage.completion_tokens
            );
        }

        completion
            .text()
            .map(str::to_owned)
            .ok_or(LlmError::EmptyContent)
    }
}

#[async_trait]
impl CompletionService for LlmClient {
    async fn complete(&self, prompt: &str) -> GenerationResult {
        match self.call(prompt).await {
            Ok(text) => GenerationResult::Success(text),
            Err(e) => {
                warn!("Completion call failed: {e}");
                GenerationResult::Failure(format!("Content generation failed: {e}"))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generation_request_carries_fixed_parameters() {
        let body = serde_json::to_value(GenerationRequest::new("Hello")).unwrap();
        assert_eq!(body["model"], MODEL);
        assert_eq!(body["temperature"], 0.7);
        assert_eq!(body["max_tokens"], 1000);
        assert_eq!(body["messages"].as_array().unwrap().len(), 1);
        assert_eq!(body["messages"][0]["role"], "user");
        assert_eq!(body["messages"][0]["content"], "Hello");
    }

    #[test]
    fn test_response_text_reads_first_choice() {
        let json = r#"{
            "choices": [{"message": {"role": "assistant", "content": "Five tips"}}],
            "usage": {"prompt_tokens": 12, "completion_tokens": 3}
        }"#;
        let response: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.text(), Some("Five tips"));
    }

    #[test]
    fn test_response_without_choices_has_no_text() {
        let response: ChatCompletionResponse = serde_json::from_str(r#"{"choices": []}"#).unwrap();
        assert_eq!(response.text(), None);
    }

    #[test]
    fn test_api_error_message_parses_error_body() {
        let body = r#"{"error": {"message": "Invalid API Key", "type": "invalid_request_error"}}"#;
        assert_eq!(api_error_message(body.to_string()), "Invalid API Key");
    }

    #[test]
    fn test_api_error_message_falls_back_to_raw_body() {
        assert_eq!(api_error_message("bad gateway".to_string()), "bad gateway");
    }

    #[test]
    fn test_generation_result_into_text() {
        assert_eq!(GenerationResult::Success("ok".into()).into_text(), "ok");
        let failure = GenerationResult::Failure("Content generation failed: timeout".into());
        assert!(!failure.is_success());
        assert_eq!(failure.into_text(), "Content generation failed: timeout");
    }
}
