//! Error types for orchestration and sessions
//!
//! The taxonomy mirrors how each failure is recovered:
//! - validation failures block the transition locally, no call is made
//! - upstream failures roll the machine back to its pre-call state
//! - execution parse failures return to approval with instructions intact
//! - invalid transitions are programming/UI errors, surfaced as such

use crate::phase::ProjectPhase;
use vibeforge_llm::LlmError;
use vibeforge_preview::PreviewError;
use vibeforge_project::BlobError;
use vibeforge_store::StoreError;

/// Input field that failed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    /// Project display name
    ProjectName,
    /// User prompt / project description
    Prompt,
}

impl std::fmt::Display for Field {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::ProjectName => "project name",
            Self::Prompt => "prompt",
        };
        write!(f, "{label}")
    }
}

/// Failures in the plan/execute state machine
#[derive(Debug, thiserror::Error)]
pub enum OrchestratorError {
    /// A required field is missing or blank; no network call was issued
    #[error("{field} is required")]
    Validation {
        /// Offending field, for inline surfacing
        field: Field,
    },

    /// The planning or execution call failed; state rolled back
    #[error("generation failed: {0}")]
    Upstream(#[from] LlmError),

    /// The execution response held no parseable JSON object; nothing was
    /// merged and the machine returned to approval
    #[error("execution response parse failed: {0}")]
    ResponseParse(#[from] ResponseParseError),

    /// Operation not valid in the current phase
    #[error("cannot {action} while {phase}")]
    InvalidTransition {
        /// Attempted operation
        action: &'static str,
        /// Phase the machine was in
        phase: ProjectPhase,
    },
}

/// Failures extracting the execution payload from model text
#[derive(Debug, thiserror::Error)]
pub enum ResponseParseError {
    /// No `{ ... }` span in the response text
    #[error("no JSON object found in response")]
    NoJsonObject,

    /// Extracted span failed to parse as the expected shape
    #[error("invalid JSON in response: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failures at the project-session boundary
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    /// State machine failure
    #[error(transparent)]
    Orchestrator(#[from] OrchestratorError),

    /// Persistence or identity failure
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Preview pipeline failure
    #[error(transparent)]
    Preview(#[from] PreviewError),

    /// File map blob round-trip failure
    #[error(transparent)]
    Blob(#[from] BlobError),
}
