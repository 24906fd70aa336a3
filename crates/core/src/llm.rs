//! Language model client.
//!
//! [`LanguageModel`] is the only shape the rest of the crate needs from a
//! model: a prompt in, generated text out. [`OpenAiClient`] implements it
//! against any OpenAI-compatible `chat/completions` endpoint.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::{PrecisError, Result};

/// Default API root for OpenAI.
pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";

/// Default chat model.
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";

/// A single completion call.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    pub prompt: String,
    /// Upper bound on generated tokens; `None` leaves it to the API.
    pub max_tokens: Option<u32>,
    pub temperature: f32,
}

impl CompletionRequest {
    pub fn new(prompt: impl Into<String>) -> Self {
        Self { prompt: prompt.into(), max_tokens: None, temperature: 0.0 }
    }

    pub fn max_tokens(mut self, value: u32) -> Self {
        self.max_tokens = Some(value);
        self
    }

    pub fn temperature(mut self, value: f32) -> Self {
        self.temperature = value;
        self
    }
}

/// Anything that can complete a prompt.
///
/// Implementations must be safe to call from many tasks at once.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, request: &CompletionRequest) -> Result<String>;
}

/// Connection settings for an OpenAI-compatible API.
#[derive(Clone)]
pub struct OpenAiConfig {
    /// Bearer token. A missing key only fails once a call is made.
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    /// Request timeout in seconds.
    pub timeout: u64,
}

impl Default for OpenAiConfig {
    fn default() -> Self {
        Self { api_key: None, base_url: DEFAULT_BASE_URL.to_string(), model: DEFAULT_MODEL.to_string(), timeout: 120 }
    }
}

impl std::fmt::Debug for OpenAiConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatResponseMessage,
}

#[derive(Deserialize)]
struct ChatResponseMessage {
    #[serde(default)]
    content: Option<String>,
}

#[derive(Deserialize)]
struct ApiErrorBody {
    error: ApiErrorDetail,
}

#[derive(Deserialize)]
struct ApiErrorDetail {
    message: String,
}

/// Client for an OpenAI-compatible chat completions API.
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    client: Client,
    config: OpenAiConfig,
    endpoint: String,
}

impl OpenAiClient {
    pub fn new(config: OpenAiConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout))
            .build()
            .map_err(PrecisError::HttpError)?;
        let endpoint = format!("{}/chat/completions", config.base_url.trim_end_matches('/'));

        Ok(Self { client, config, endpoint })
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }
}

#[async_trait]
impl LanguageModel for OpenAiClient {
    async fn complete(&self, request: &CompletionRequest) -> Result<String> {
        let api_key = self.config.api_key.as_deref().ok_or(PrecisError::MissingApiKey)?;

        let body = ChatRequest {
            model: &self.config.model,
            messages: vec![ChatMessage { role: "user", content: &request.prompt }],
            temperature: request.temperature,
            max_tokens: request.max_tokens,
        };

        debug!(model = %self.config.model, prompt_chars = request.prompt.len(), "requesting completion");

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(api_key)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() { PrecisError::Timeout { timeout: self.config.timeout } } else { PrecisError::HttpError(e) }
            })?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = serde_json::from_str::<ApiErrorBody>(&text)
                .map(|body| body.error.message)
                .unwrap_or(text);
            return Err(PrecisError::LlmError { status: status.as_u16(), message });
        }

        let text = response.text().await?;
        let chat: ChatResponse = serde_json::from_str(&text)?;
        chat.choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|content| !content.trim().is_empty())
            .ok_or(PrecisError::EmptyCompletion)
    }
}
