//! Vibeforge Preview - no-build-step rendering pipeline
//!
//! Turns a project file map written in a JSX-like syntax with ES module
//! import/export statements into one self-contained HTML document:
//! - [`imports`]: conservative import-statement extraction
//! - [`resolve`]: specifier → global / local file / style asset
//! - [`inline`]: depth-first flattening into a module-free script body
//! - [`styles`]: stylesheet aggregation with build-directive stripping
//! - [`document`]: standalone HTML assembly with a guarded mount script
//! - [`session`]: the at-most-one-live-resource preview session
//!
//! The pipeline is fail-open: anything it cannot resolve stays in the
//! output and surfaces, at worst, inside the rendered document's error
//! panel. The only fatal conditions are a missing root and a circular
//! import.
//!
//! # Example
//!
//! ```rust
//! use vibeforge_preview::render_document;
//! use vibeforge_project::FileMap;
//!
//! let files = FileMap::from_iter([(
//!     "src/App.tsx",
//!     "export default function App(){ return <div>Hi</div> }",
//! )]);
//! let html = render_document(&files, "demo").unwrap();
//! assert!(html.contains("Hi"));
//! assert!(!html.contains("export default"));
//! ```

#![warn(unreachable_pub)]

pub mod document;
pub mod error;
pub mod imports;
pub mod inline;
pub mod resolve;
pub mod session;
pub mod styles;

pub use document::assemble;
pub use error::PreviewError;
pub use imports::{extract_bindings, extract_statements, ImportBinding, ImportStatement};
pub use inline::{flatten_root, ENTRY_SYMBOL};
pub use resolve::{external_global, resolve, ResolvedReference, EXTERNAL_GLOBALS};
pub use session::{render_document, HandleId, PreviewDocument, PreviewSession};
pub use styles::{collect_styles, strip_build_directives};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
