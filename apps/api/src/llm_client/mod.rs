//! LLM Client: the single point of entry for all text-completion calls.
//!
//! ARCHITECTURAL RULE: No other module may call the completion API directly.
//! Stages depend on the `CompletionService` trait; `LlmClient` is the live backend.
//!
//! Models are hardcoded per tier to prevent drift.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

pub mod prompts;

/// OpenAI-compatible chat completions endpoint (Groq).
pub const GROQ_CHAT_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
/// Larger model, used deterministically for structured extraction.
pub const EXTRACTION_MODEL: &str = "llama3-70b-8192";
/// Smaller model, used for drafting letters and emails.
pub const DRAFTING_MODEL: &str = "llama3-8b-8192";
const MAX_TOKENS: u32 = 4096;
const MAX_RETRIES: u32 = 3;

#[derive(Debug, Error)]
pub enum LlmError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited after {retries} retries")]
    RateLimited { retries: u32 },

    #[error("LLM returned empty content")]
    EmptyContent,
}

/// Which model a completion is routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModelTier {
    Extraction,
    Drafting,
}

impl ModelTier {
    pub fn model(self) -> &'static str {
        match self {
            ModelTier::Extraction => EXTRACTION_MODEL,
            ModelTier::Drafting => DRAFTING_MODEL,
        }
    }

    /// Extraction runs at temperature 0; drafting keeps the provider default.
    fn temperature(self) -> Option<f32> {
        match self {
            ModelTier::Extraction => Some(0.0),
            ModelTier::Drafting => None,
        }
    }
}

/// Opaque text-completion service. No output schema is guaranteed;
/// callers own all validation of the returned text.
#[async_trait]
pub trait CompletionService: Send + Sync {
    async fn complete(&self, prompt: &str, tier: ModelTier) -> Result<String, LlmError>;
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    messages: Vec<ChatMessage<'a>>,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Vec<Choice>,
    pub usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    pub message: ChoiceMessage,
}

#[derive(Debug, Deserialize)]
pub struct ChoiceMessage {
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
}

impl ChatResponse {
    /// Extracts the text content of the first choice.
    pub fn text(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|c| c.message.content.as_deref())
    }
}

#[derive(Debug, Deserialize)]
struct ApiError {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    message: String,
}

/// The live completion client. Wraps the chat-completions API with retry on
/// rate limits and server errors.
#[derive(Clone)]
pub struct LlmClient {
    client: Client,
    api_url: String,
    api_key: String,
}

impl LlmClient {
    pub fn new(api_url: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            api_url,
            api_key,
        }
    }

    /// Makes a raw call to the completion API, returning the full response object.
    /// Retries on 429 (rate limit) and 5xx errors with exponential backoff.
    pub async fn call(&self, prompt: &str, tier: ModelTier) -> Result<ChatResponse, LlmError> {
        let request_body = ChatRequest {
            model: tier.model(),
            max_tokens: MAX_TOKENS,
            temperature: tier.temperature(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
        };

        let mut last_error: Option<LlmError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // Exponential backoff: 1s, 2s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "LLM call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let response = self
                .client
                .post(&self.api_url)
                .bearer_auth(&self.api_key)
                .json(&request_body)
                .send()
                .await;

            let response = match response {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(LlmError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("LLM API returned {}: {}", status, body);
                last_error = Some(LlmError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let body = response.text().await.unwrap_or_default();
                let message = serde_json::from_str::<ApiError>(&body)
                    .map(|e| e.error.message)
                    .unwrap_or(body);
                return Err(LlmError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            let chat_response: ChatResponse = response.json().await?;

            if let Some(usage) = &chat_response.usage {
                debug!(
                    "LLM call succeeded: model={}, prompt_tokens={}, completion_tokens={}",
                    tier.model(),
                    usage.prompt_tokens,
                    usage.completion_tokens
                );
            }

            return Ok(chat_response);
        }

        Err(last_error.unwrap_or(LlmError::RateLimited {
            retries: MAX_RETRIES,
        }))
    }
}

#[async_trait]
impl CompletionService for LlmClient {
    async fn complete(&self, prompt: &str, tier: ModelTier) -> Result<String, LlmError> {
        let response = self.call(prompt, tier).await?;
        response
            .text()
            .map(str::to_string)
            .ok_or(LlmError::EmptyContent)
    }
}
