//! In-memory project source tree
//!
//! Provides [`FileMap`], the single shared mutable state operated on by the
//! preview pipeline and the orchestrator: an insertion-ordered mapping of
//! [`ProjectPath`] to UTF-8 source text. Persisted opaquely as one JSON
//! object blob.

use crate::path::ProjectPath;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Path → source text mapping for one project session
///
/// Iteration order is insertion order; stylesheet concatenation and the
/// display tree both depend on it being deterministic.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FileMap {
    entries: IndexMap<ProjectPath, String>,
}

impl FileMap {
    /// Create an empty file map
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of files
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the map holds no files
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Insert or overwrite one file
    pub fn insert(&mut self, path: impl Into<ProjectPath>, content: impl Into<String>) {
        self.entries.insert(path.into(), content.into());
    }

    /// Content of a file, if present
    #[inline]
    #[must_use]
    pub fn get(&self, path: &ProjectPath) -> Option<&str> {
        self.entries.get(path).map(String::as_str)
    }

    /// Whether a file exists at the given path
    #[inline]
    #[must_use]
    pub fn contains(&self, path: &ProjectPath) -> bool {
        self.entries.contains_key(path)
    }

    /// Remove a file, returning its content
    pub fn remove(&mut self, path: &ProjectPath) -> Option<String> {
        self.entries.shift_remove(path)
    }

    /// Iterator over `(path, content)` in insertion order
    #[inline]
    pub fn iter(&self) -> impl Iterator<Item = (&ProjectPath, &str)> {
        self.entries.iter().map(|(p, c)| (p, c.as_str()))
    }

    /// Iterator over paths in insertion order
    #[inline]
    pub fn paths(&self) -> impl Iterator<Item = &ProjectPath> {
        self.entries.keys()
    }

    /// Stylesheet entries in insertion order
    #[inline]
    pub fn style_entries(&self) -> impl Iterator<Item = (&ProjectPath, &str)> {
        self.iter().filter(|(path, _)| path.is_style())
    }

    /// Merge updated files into the map
    ///
    /// Every entry is a whole-value overwrite keyed by path, not a patch.
    /// Existing paths keep their position; new paths append. Returns the
    /// number of entries applied.
    pub fn merge<I, P, C>(&mut self, updates: I) -> usize
    where
        I: IntoIterator<Item = (P, C)>,
        P: Into<ProjectPath>,
        C: Into<String>,
    {
        let mut applied = 0;
        for (path, content) in updates {
            self.entries.insert(path.into(), content.into());
            applied += 1;
        }
        applied
    }

    /// Serialize to the opaque persistence blob
    ///
    /// # Errors
    /// Returns [`BlobError`] if serialization fails (it cannot for valid
    /// UTF-8 content, but the signature keeps the fallible seam explicit).
    pub fn to_blob(&self) -> Result<serde_json::Value, BlobError> {
        serde_json::to_value(self).map_err(BlobError::Encode)
    }

    /// Deserialize from the opaque persistence blob
    ///
    /// # Errors
    /// Returns [`BlobError`] if the blob is not a string→string object.
    pub fn from_blob(blob: serde_json::Value) -> Result<Self, BlobError> {
        serde_json::from_value(blob).map_err(BlobError::Decode)
    }
}

impl<P: Into<ProjectPath>, C: Into<String>> FromIterator<(P, C)> for FileMap {
    fn from_iter<I: IntoIterator<Item = (P, C)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (path, content) in iter {
            map.insert(path, content);
        }
        map
    }
}

/// Errors round-tripping the persistence blob
#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    /// Serialization failed
    #[error("file map blob encode failed: {0}")]
    Encode(#[source] serde_json::Error),

    /// Blob was not a path→content object
    #[error("file map blob decode failed: {0}")]
    Decode(#[source] serde_json::Error),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn sample() -> FileMap {
        FileMap::from_iter([
            ("src/App.tsx", "export default function App() {}"),
            ("src/index.css", "body { margin: 0; }"),
            ("src/theme.css", ".accent { color: teal; }"),
        ])
    }

    #[test]
    fn filemap_insert_get_contains() {
        let map = sample();
        let path = ProjectPath::new("src/App.tsx");
        assert!(map.contains(&path));
        assert_eq!(map.get(&path), Some("export default function App() {}"));
        assert!(!map.contains(&ProjectPath::new("src/missing.tsx")));
    }

    #[test]
    fn filemap_iteration_preserves_insertion_order() {
        let map = sample();
        let paths: Vec<_> = map.paths().map(ProjectPath::as_str).collect();
        assert_eq!(paths, vec!["src/App.tsx", "src/index.css", "src/theme.css"]);
    }

    #[test]
    fn filemap_style_entries_in_order() {
        let map = sample();
        let styles: Vec<_> = map.style_entries().map(|(p, _)| p.as_str()).collect();
        assert_eq!(styles, vec!["src/index.css", "src/theme.css"]);
    }

    #[test]
    fn filemap_merge_overwrites_and_appends() {
        let mut map = sample();
        let applied = map.merge([
            ("src/App.tsx", "X"),
            ("src/New.tsx", "export const n = 1;"),
        ]);
        assert_eq!(applied, 2);
        assert_eq!(map.get(&ProjectPath::new("src/App.tsx")), Some("X"));
        assert_eq!(map.len(), 4);

        // Overwritten keys keep their position; new keys append.
        let paths: Vec<_> = map.paths().map(ProjectPath::as_str).collect();
        assert_eq!(
            paths,
            vec!["src/App.tsx", "src/index.css", "src/theme.css", "src/New.tsx"]
        );
    }

    #[test]
    fn filemap_merge_untouched_entries_unchanged() {
        let mut map = sample();
        map.merge([("src/App.tsx", "X")]);
        assert_eq!(
            map.get(&ProjectPath::new("src/index.css")),
            Some("body { margin: 0; }")
        );
    }

    #[test]
    fn filemap_blob_round_trip() {
        let map = sample();
        let blob = map.to_blob().unwrap();
        assert!(blob.is_object());
        let back = FileMap::from_blob(blob).unwrap();
        assert_eq!(back, map);
    }

    #[test]
    fn filemap_blob_rejects_non_object() {
        let result = FileMap::from_blob(serde_json::json!([1, 2, 3]));
        assert!(matches!(result, Err(BlobError::Decode(_))));
    }

    #[test]
    fn filemap_remove() {
        let mut map = sample();
        let removed = map.remove(&ProjectPath::new("src/theme.css"));
        assert_eq!(removed.as_deref(), Some(".accent { color: teal; }"));
        assert_eq!(map.len(), 2);
    }
}
