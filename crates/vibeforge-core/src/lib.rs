//! Vibeforge Core - plan/execute orchestration
//!
//! The central coordination layer:
//! - Validates user input and runs the planning call
//! - Holds the plan user-editable until approved or rejected
//! - Runs the execution call and merges returned files into the map
//! - Wires persistence, identity, and the live preview around one session
//!
//! # Example
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use vibeforge_core::{ProjectSession, SessionConfig};
//! use vibeforge_llm::{HttpCompletionClient, LlmConfig};
//! use vibeforge_store::{MemoryStore, StaticIdentity};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = Arc::new(HttpCompletionClient::new(LlmConfig::new("api-key"))?);
//! let store = Arc::new(MemoryStore::new());
//! let identity = Arc::new(StaticIdentity::new("user_1", "Alex"));
//!
//! let mut session = ProjectSession::new(
//!     store,
//!     Some(identity),
//!     client,
//!     SessionConfig::new(),
//!     "todo-app",
//!     "a small todo list",
//! );
//! session.plan("Build a todo list with add and remove").await?;
//! session.approve().await?;
//! session.start_preview()?;
//! # Ok(())
//! # }
//! ```

#![warn(unreachable_pub)]

pub mod error;
pub mod orchestrator;
pub mod phase;
pub mod plan;
pub mod prompts;
pub mod response;
pub mod session;

pub use error::{Field, OrchestratorError, ResponseParseError, SessionError};
pub use orchestrator::{ExecutionOutcome, Orchestrator, OrchestratorConfig};
pub use phase::ProjectPhase;
pub use plan::{extract_file_paths, PlanInstructions};
pub use prompts::{execution_prompt, planning_prompt, serialize_file_map};
pub use response::{extract_json_span, parse_execution_response, ExecutionResponse};
pub use session::{ProjectSession, SessionConfig};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for driving a project session
    pub use crate::{
        ExecutionOutcome, Orchestrator, OrchestratorConfig, OrchestratorError, PlanInstructions,
        ProjectPhase, ProjectSession, SessionConfig, SessionError,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
