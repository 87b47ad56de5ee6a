//! Error types for completion calls
//!
//! Every variant maps to the orchestrator's "generation failed" handling:
//! the state machine rolls back to its pre-call state and surfaces a
//! notification, with no partial mutation.

/// Failures talking to the text-completion service
#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    /// Network-level failure (connect, timeout, body read)
    #[error("completion transport failed: {0}")]
    Transport(#[from] reqwest::Error),

    /// Endpoint answered with a non-success status
    #[error("completion endpoint returned status {status}")]
    Status {
        /// HTTP status code
        status: u16,
    },

    /// Response decoded but the expected completion field is missing
    #[error("completion response missing expected fields")]
    MalformedResponse,

    /// Scripted test double ran out of canned responses
    #[error("no scripted completion left")]
    Exhausted,
}

impl LlmError {
    /// Whether the failure came from the service rather than this process
    #[inline]
    #[must_use]
    pub fn is_upstream(&self) -> bool {
        matches!(
            self,
            Self::Transport(_) | Self::Status { .. } | Self::MalformedResponse
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_display() {
        let err = LlmError::Status { status: 500 };
        assert!(err.to_string().contains("500"));
        assert!(err.is_upstream());
    }

    #[test]
    fn exhausted_is_not_upstream() {
        assert!(!LlmError::Exhausted.is_upstream());
    }
}
