//! HTTP chat-completions client
//!
//! Speaks the OpenAI-style `/chat/completions` shape: one user message
//! carrying the whole prompt, fixed sampling parameters, bearer auth. The
//! completion text is read from `choices[0].message.content`.

use crate::client::{CompletionClient, CompletionRequest};
use crate::error::LlmError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for [`HttpCompletionClient`]
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LlmConfig {
    /// Service base URL (no trailing `/chat/completions`)
    pub base_url: String,
    /// Bearer token
    pub api_key: String,
    /// Model used when the request carries none
    pub default_model: String,
    /// Request timeout in seconds
    pub timeout_secs: u64,
}

impl LlmConfig {
    /// Config for a given API key with default endpoint and model
    #[inline]
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// With a different base URL
    #[inline]
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// With a different default model
    #[inline]
    #[must_use]
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.default_model = model.into();
        self
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.aimlapi.com".to_string(),
            api_key: String::new(),
            default_model: "gemini-2.0-flash".to_string(),
            timeout_secs: 60,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f64,
    top_p: f64,
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: Option<String>,
}

/// Completion client over HTTP
#[derive(Debug, Clone)]
pub struct HttpCompletionClient {
    client: reqwest::Client,
    config: LlmConfig,
}

impl HttpCompletionClient {
    /// Build a client for the given configuration
    ///
    /// # Errors
    /// [`LlmError::Transport`] if the underlying HTTP client cannot be
    /// constructed.
    pub fn new(config: LlmConfig) -> Result<Self, LlmError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;
        Ok(Self { client, config })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/chat/completions",
            self.config.base_url.trim_end_matches('/')
        )
    }
}

#[async_trait]
impl CompletionClient for HttpCompletionClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        let model = request
            .model
            .as_deref()
            .unwrap_or(&self.config.default_model);
        let body = ChatRequest {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: &request.prompt,
            }],
            temperature: 0.7,
            top_p: 0.95,
        };

        tracing::debug!(model, prompt_len = request.prompt.len(), "sending completion request");
        let response = self
            .client
            .post(self.endpoint())
            .bearer_auth(&self.config.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!(status = status.as_u16(), "completion endpoint error");
            return Err(LlmError::Status {
                status: status.as_u16(),
            });
        }

        let parsed: ChatResponse = response.json().await?;
        parsed
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .ok_or(LlmError::MalformedResponse)
    }
}
