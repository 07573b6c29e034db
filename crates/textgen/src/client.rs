//! HTTP client for an OpenAI-compatible chat-completions endpoint.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::TextGenerator;

/// Default request timeout for a single generation call. A slow provider
/// must never hold up an alert cycle longer than this.
const DEFAULT_TIMEOUT_SECS: u64 = 20;

/// Default model when `TEXTGEN_MODEL` is not set.
const DEFAULT_MODEL: &str = "gpt-4o-mini";

/// Default API base URL when `TEXTGEN_API_URL` is not set.
const DEFAULT_API_URL: &str = "https://api.openai.com/v1";

/// Errors from the text-generation provider layer.
#[derive(Debug, thiserror::Error)]
pub enum TextGenError {
    /// The HTTP request itself failed (network, DNS, TLS, timeout).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("Provider API error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The provider response did not contain completion text.
    #[error("Malformed provider response: {0}")]
    MalformedResponse(String),
}

/// Provider configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct TextGenConfig {
    /// Base API URL, e.g. `https://api.openai.com/v1`.
    pub api_url: String,
    /// Bearer token for the provider.
    pub api_key: String,
    /// Model identifier sent with every request.
    pub model: String,
    /// Request timeout for a single generation call.
    pub timeout: Duration,
}

impl TextGenConfig {
    /// Load provider configuration from the environment.
    ///
    /// Returns `None` when `TEXTGEN_API_KEY` is absent, which callers treat
    /// as "provider unconfigured": alerts are generated with deterministic
    /// content only.
    ///
    /// | Env Var                | Default                     |
    /// |------------------------|-----------------------------|
    /// | `TEXTGEN_API_KEY`      | (required)                  |
    /// | `TEXTGEN_API_URL`      | `https://api.openai.com/v1` |
    /// | `TEXTGEN_MODEL`        | `gpt-4o-mini`               |
    /// | `TEXTGEN_TIMEOUT_SECS` | `20`                        |
    pub fn from_env() -> Option<Self> {
        let api_key = std::env::var("TEXTGEN_API_KEY").ok()?;

        let api_url = std::env::var("TEXTGEN_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_URL.into())
            .trim_end_matches('/')
            .to_string();

        let model = std::env::var("TEXTGEN_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.into());

        let timeout_secs: u64 = std::env::var("TEXTGEN_TIMEOUT_SECS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(DEFAULT_TIMEOUT_SECS);

        Some(Self {
            api_url,
            api_key,
            model,
            timeout: Duration::from_secs(timeout_secs),
        })
    }
}

/// Reqwest-backed client for the provider's chat-completions API.
pub struct TextGenClient {
    client: reqwest::Client,
    config: TextGenConfig,
}

/// Response returned by the `/chat/completions` endpoint.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    content: Option<String>,
}

impl TextGenClient {
    /// Create a client with the given configuration.
    ///
    /// The request timeout is applied at the HTTP client level so every
    /// generation call is bounded.
    pub fn new(config: TextGenConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to build reqwest HTTP client");
        Self { client, config }
    }

    /// Create a client from environment variables, or `None` when the
    /// provider is unconfigured.
    pub fn from_env() -> Option<Self> {
        TextGenConfig::from_env().map(Self::new)
    }

    /// Model identifier this client sends with every request.
    pub fn model(&self) -> &str {
        &self.config.model
    }

    fn extract_content(parsed: ChatCompletionResponse) -> Result<String, TextGenError> {
        let content = parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .unwrap_or_default();

        if content.trim().is_empty() {
            return Err(TextGenError::MalformedResponse(
                "completion contained no text".to_string(),
            ));
        }
        Ok(content)
    }
}

#[async_trait]
impl TextGenerator for TextGenClient {
    async fn generate(
        &self,
        system_prompt: &str,
        user_prompt: &str,
        max_tokens: u32,
        temperature: f32,
    ) -> Result<String, TextGenError> {
        let body = serde_json::json!({
            "model": self.config.model,
            "max_tokens": max_tokens,
            "temperature": temperature,
            "messages": [
                { "role": "system", "content": system_prompt },
                { "role": "user", "content": user_prompt },
            ],
        });

        tracing::debug!(model = %self.config.model, "Requesting text generation");

        let response = self
            .client
            .post(format!("{}/chat/completions", self.config.api_url))
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(TextGenError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let parsed: ChatCompletionResponse = response.json().await?;
        Self::extract_content(parsed)
    }
}
