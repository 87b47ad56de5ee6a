//! Vibeforge Project - file map and paths
//!
//! The in-memory project source tree shared by the preview pipeline and the
//! orchestrator:
//! - [`ProjectPath`]: normalized project-relative paths
//! - [`FileMap`]: insertion-ordered path→text mapping with blob round-trip
//! - [`template`]: the fixed starter project
//! - [`tree`]: display-tree derivation for file explorers

#![warn(unreachable_pub)]

pub mod filemap;
pub mod path;
pub mod template;
pub mod tree;

pub use filemap::{BlobError, FileMap};
pub use path::{
    ProjectPath, DEFAULT_SOURCE_EXTENSION, SOURCE_EXTENSIONS, STYLE_EXTENSIONS,
};
pub use template::{root_component, starter_files};
pub use tree::{derive_tree, TreeNode};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
