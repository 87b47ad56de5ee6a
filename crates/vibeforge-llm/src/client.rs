//! Completion client interface
//!
//! The planning and execution calls are both plain text-in/text-out
//! completions; everything the orchestrator needs is behind
//! [`CompletionClient`] so the two LLM operations stay decoupled from any
//! transport or provider.

use crate::error::LlmError;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// One completion request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Full prompt text
    pub prompt: String,
    /// Model override; the client's default applies when absent
    pub model: Option<String>,
}

impl CompletionRequest {
    /// Request with the client's default model
    #[inline]
    #[must_use]
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            model: None,
        }
    }

    /// With an explicit model
    #[inline]
    #[must_use]
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

/// Black-box text-completion service
///
/// The success value is the model's full text completion; shape validation
/// of that text (JSON extraction for execution responses) is the caller's
/// concern.
#[async_trait]
pub trait CompletionClient: Send + Sync {
    /// Run one completion
    ///
    /// # Errors
    /// [`LlmError`] on transport failure, non-success status, or a
    /// response missing the completion field.
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError>;
}
