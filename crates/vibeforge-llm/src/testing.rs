//! Scripted completion client for tests
//!
//! Orchestrator tests run the full plan/approve/execute cycle without a
//! network: responses are queued up front and every received prompt is
//! recorded for assertion.

use crate::client::{CompletionClient, CompletionRequest};
use crate::error::LlmError;
use async_trait::async_trait;
use std::collections::VecDeque;
use tokio::sync::Mutex;

/// Completion client replaying a fixed script of outcomes
#[derive(Debug, Default)]
pub struct ScriptedClient {
    responses: Mutex<VecDeque<Result<String, LlmError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedClient {
    /// Client with an empty script (every call fails as exhausted)
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue a successful completion
    #[must_use]
    pub fn with_ok(mut self, text: impl Into<String>) -> Self {
        self.responses.get_mut().push_back(Ok(text.into()));
        self
    }

    /// Queue a non-success HTTP status
    #[must_use]
    pub fn with_status(mut self, status: u16) -> Self {
        self.responses
            .get_mut()
            .push_back(Err(LlmError::Status { status }));
        self
    }

    /// Queue a malformed-response failure
    #[must_use]
    pub fn with_malformed(mut self) -> Self {
        self.responses
            .get_mut()
            .push_back(Err(LlmError::MalformedResponse));
        self
    }

    /// Prompts received so far, in call order
    pub async fn prompts(&self) -> Vec<String> {
        self.prompts.lock().await.clone()
    }

    /// Number of completions not yet consumed
    pub async fn remaining(&self) -> usize {
        self.responses.lock().await.len()
    }
}

#[async_trait]
impl CompletionClient for ScriptedClient {
    async fn complete(&self, request: CompletionRequest) -> Result<String, LlmError> {
        self.prompts.lock().await.push(request.prompt);
        self.responses
            .lock()
            .await
            .pop_front()
            .unwrap_or(Err(LlmError::Exhausted))
    }
}
