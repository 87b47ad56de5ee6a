//! Vibeforge Store - persistence and identity collaborators
//!
//! The core treats storage and identity as external collaborators,
//! specified only via the interfaces it needs:
//! - [`ProjectStore`]: CRUD over [`ProjectRecord`], file map stored as an
//!   opaque blob
//! - [`Identity`]: stable user id scoping every persistence call
//! - [`MemoryStore`] / [`StaticIdentity`]: in-process implementations

#![warn(unreachable_pub)]

pub mod error;
pub mod identity;
pub mod record;
pub mod store;

pub use error::StoreError;
pub use identity::{Identity, StaticIdentity};
pub use record::{ProjectId, ProjectPatch, ProjectRecord, UserId};
pub use store::{MemoryStore, ProjectStore};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
