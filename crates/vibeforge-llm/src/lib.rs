//! Vibeforge LLM - text-completion collaborator
//!
//! The planning and execution calls both go through one narrow interface:
//! - [`CompletionClient`]: prompt in, completion text out
//! - [`HttpCompletionClient`]: OpenAI-style chat-completions transport
//! - [`testing::ScriptedClient`]: canned responses for tests
//!
//! Shape validation of the completion text (JSON extraction and so on) is
//! the caller's concern; this crate only moves text.

#![warn(unreachable_pub)]

pub mod client;
pub mod error;
pub mod http;
pub mod testing;

pub use client::{CompletionClient, CompletionRequest};
pub use error::LlmError;
pub use http::{HttpCompletionClient, LlmConfig};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
