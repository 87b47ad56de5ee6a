//! Preview session and resource-handle lifecycle
//!
//! The embedding surface turns each generated document into a transient
//! resource (a blob URL behind a sandboxed iframe). That resource must
//! never accumulate: at most one live document exists per session, a new
//! render displaces the previous one, and stopping the preview releases
//! the last. Handles are never reused.
//!
//! The sandbox policy of the embedding surface is a hard security
//! boundary: generated code runs with script execution allowed but without
//! same-origin access to the host page.

use crate::document::assemble;
use crate::error::PreviewError;
use crate::inline::flatten_root;
use crate::styles::collect_styles;
use ulid::Ulid;
use vibeforge_project::{FileMap, ProjectPath};

/// Root files tried in order when rendering a preview
const ROOT_CANDIDATES: &[&str] = &["src/App.tsx", "src/App.jsx", "src/App.js"];

/// Identifier of one generated preview resource, never reused
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct HandleId(Ulid);

impl HandleId {
    fn new() -> Self {
        Self(Ulid::new())
    }
}

impl std::fmt::Display for HandleId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One generated preview document plus its resource handle
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PreviewDocument {
    /// Resource handle the embedding surface binds the document to
    pub handle: HandleId,
    /// Complete standalone HTML
    pub html: String,
}

/// Run the full pipeline for a file map without touching session state
///
/// Pure function of its inputs: flatten the root, aggregate styles,
/// assemble the document.
///
/// # Errors
/// Propagates fatal flattening conditions ([`PreviewError`]).
pub fn render_document(files: &FileMap, project_name: &str) -> Result<String, PreviewError> {
    let root = select_root(files);
    let script = flatten_root(files, &root)?;
    let styles = collect_styles(files);
    Ok(assemble(&script, &styles, project_name))
}

/// Pick the root component, falling back to the starter template's root
/// when the project has none of the candidates (a freshly wiped map still
/// previews the hello page rather than nothing).
fn select_root(files: &FileMap) -> ProjectPath {
    ROOT_CANDIDATES
        .iter()
        .map(ProjectPath::new)
        .find(|candidate| files.contains(candidate))
        .unwrap_or_else(vibeforge_project::root_component)
}

/// Owner of the at-most-one-live-document invariant
#[derive(Debug, Default)]
pub struct PreviewSession {
    live: Option<PreviewDocument>,
}

impl PreviewSession {
    /// Create a session with no live preview
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether a preview is currently live
    #[inline]
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.live.is_some()
    }

    /// Currently installed document, if any
    #[inline]
    #[must_use]
    pub fn live(&self) -> Option<&PreviewDocument> {
        self.live.as_ref()
    }

    /// Render the file map and install the result
    ///
    /// Returns the displaced document (if one was live) so the embedding
    /// surface can revoke its resource.
    ///
    /// # Errors
    /// Fatal flattening conditions; on error the previously live document
    /// stays installed untouched.
    pub fn render(
        &mut self,
        files: &FileMap,
        project_name: &str,
    ) -> Result<Option<PreviewDocument>, PreviewError> {
        // If the root falls back to the starter template, flatten that map
        // instead of the project's.
        let html = match render_document(files, project_name) {
            Ok(html) => html,
            Err(PreviewError::MissingRoot { .. }) => {
                render_document(&vibeforge_project::starter_files(), project_name)?
            }
            Err(other) => return Err(other),
        };

        let document = PreviewDocument {
            handle: HandleId::new(),
            html,
        };
        tracing::debug!(handle = %document.handle, "installing preview document");
        let displaced = self.live.replace(document);
        if let Some(previous) = &displaced {
            tracing::debug!(handle = %previous.handle, "releasing displaced preview document");
        }
        Ok(displaced)
    }

    /// Stop the preview, releasing the live document
    pub fn stop(&mut self) -> Option<PreviewDocument> {
        let released = self.live.take();
        if let Some(document) = &released {
            tracing::debug!(handle = %document.handle, "releasing preview document on stop");
        }
        released
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn simple_files() -> FileMap {
        FileMap::from_iter([(
            "src/App.tsx",
            "export default function App(){ return <div>Hi</div> }",
        )])
    }

    #[test]
    fn render_installs_live_document() {
        let mut session = PreviewSession::new();
        assert!(!session.is_running());

        let displaced = session.render(&simple_files(), "demo").unwrap();
        assert!(displaced.is_none());
        assert!(session.is_running());
        assert!(session.live().unwrap().html.contains("Hi"));
    }

    #[test]
    fn refresh_displaces_previous_document() {
        let mut session = PreviewSession::new();
        session.render(&simple_files(), "demo").unwrap();
        let first = session.live().unwrap().handle;

        let displaced = session.render(&simple_files(), "demo").unwrap().unwrap();
        assert_eq!(displaced.handle, first);
        assert_ne!(session.live().unwrap().handle, first, "handles are never reused");
    }

    #[test]
    fn stop_releases_live_document() {
        let mut session = PreviewSession::new();
        session.render(&simple_files(), "demo").unwrap();
        let released = session.stop();
        assert!(released.is_some());
        assert!(!session.is_running());
        assert!(session.stop().is_none());
    }

    #[test]
    fn render_error_keeps_previous_document() {
        let mut session = PreviewSession::new();
        session.render(&simple_files(), "demo").unwrap();
        let live_before = session.live().unwrap().handle;

        let cyclic = FileMap::from_iter([
            ("src/App.tsx", "import B from './B';\nexport default function App(){}"),
            ("src/B.tsx", "import A from './App';\nexport default function B(){}"),
        ]);
        let err = session.render(&cyclic, "demo").unwrap_err();
        assert!(matches!(err, PreviewError::CircularImport { .. }));
        assert_eq!(session.live().unwrap().handle, live_before);
    }

    #[test]
    fn empty_project_falls_back_to_starter() {
        let mut session = PreviewSession::new();
        session.render(&FileMap::new(), "demo").unwrap();
        assert!(session.live().unwrap().html.contains("Hello Vibeforge!"));
    }

    #[test]
    fn root_candidates_prefer_tsx() {
        let files = FileMap::from_iter([
            ("src/App.js", "export default function App(){ return null }"),
            ("src/App.tsx", "export default function App(){ return <b>t</b> }"),
        ]);
        assert_eq!(select_root(&files).as_str(), "src/App.tsx");
    }
}
