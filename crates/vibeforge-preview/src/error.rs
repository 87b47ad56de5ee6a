//! Error types for the preview pipeline
//!
//! Unresolvable imports are deliberately NOT errors: the pipeline is
//! fail-open, and an unresolved statement is left inert in the flattened
//! script so any consequence surfaces inside the rendered document's error
//! panel instead of failing assembly.

use vibeforge_project::ProjectPath;

/// Fatal conditions for flattening one root file
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PreviewError {
    /// Local files import each other transitively
    #[error("circular import detected at '{path}'")]
    CircularImport {
        /// File that was re-entered while still being inlined
        path: ProjectPath,
    },

    /// The requested root file is not in the file map
    #[error("root file '{path}' not found in project")]
    MissingRoot {
        /// Requested root path
        path: ProjectPath,
    },

    /// A file vanished between resolution and inlining
    #[error("imported file '{path}' not found in project")]
    MissingFile {
        /// Resolved path that failed lookup
        path: ProjectPath,
    },
}
