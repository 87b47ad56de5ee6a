//! Project-relative file paths
//!
//! Provides [`ProjectPath`] for addressing files inside a project file map.
//! Paths are forward-slash separated and always relative to the project
//! root (e.g. `src/App.tsx`). Directories are never materialized; folder
//! structure is derived by splitting paths on demand.

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt::{self, Display, Formatter};

/// Source extensions recognized when resolving import specifiers.
pub const SOURCE_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx"];

/// Extension appended to extensionless local specifiers.
pub const DEFAULT_SOURCE_EXTENSION: &str = "tsx";

/// Stylesheet extensions handled by the style aggregator.
pub const STYLE_EXTENSIONS: &[&str] = &["css"];

/// Normalized project-relative path
///
/// Construction normalizes the input: backslashes become forward slashes,
/// empty and `.` segments are dropped, and `..` segments pop the previous
/// segment, clamping at the project root rather than escaping it.
///
/// # Examples
/// - `src/App.tsx`
/// - `src/components/Button.tsx`
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ProjectPath(String);

impl<'de> Deserialize<'de> for ProjectPath {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        // Stored blobs and model responses both funnel through the same
        // normalization as direct construction.
        let raw = String::deserialize(deserializer)?;
        Ok(Self::new(raw))
    }
}

impl ProjectPath {
    /// Create a normalized path from arbitrary input
    #[must_use]
    pub fn new(raw: impl AsRef<str>) -> Self {
        let mut segments: Vec<&str> = Vec::new();
        let replaced = raw.as_ref().replace('\\', "/");
        for segment in replaced.split('/') {
            match segment {
                "" | "." => {}
                ".." => {
                    // Clamp at root: popping an empty stack is a no-op.
                    segments.pop();
                }
                other => segments.push(other),
            }
        }
        Self(segments.join("/"))
    }

    /// Path as a string slice
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Iterator over path segments from root to leaf
    #[inline]
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/').filter(|s| !s.is_empty())
    }

    /// Final segment (file name), if any
    #[inline]
    #[must_use]
    pub fn file_name(&self) -> Option<&str> {
        self.segments().last()
    }

    /// Directory portion of the path (everything before the file name)
    ///
    /// A path with a single segment lives at the project root, which is
    /// the empty directory.
    #[must_use]
    pub fn directory(&self) -> Self {
        match self.0.rfind('/') {
            Some(idx) => Self(self.0[..idx].to_string()),
            None => Self(String::new()),
        }
    }

    /// Extension after the final `.` of the file name, if any
    #[must_use]
    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name()?;
        let dot = name.rfind('.')?;
        if dot == 0 || dot + 1 == name.len() {
            return None;
        }
        Some(&name[dot + 1..])
    }

    /// Whether the path carries a recognized component-source extension
    #[inline]
    #[must_use]
    pub fn has_source_extension(&self) -> bool {
        self.extension()
            .is_some_and(|ext| SOURCE_EXTENSIONS.contains(&ext))
    }

    /// Whether the path names a stylesheet
    #[inline]
    #[must_use]
    pub fn is_style(&self) -> bool {
        self.extension()
            .is_some_and(|ext| STYLE_EXTENSIONS.contains(&ext))
    }

    /// Copy of this path with the default source extension appended
    #[must_use]
    pub fn with_default_extension(&self) -> Self {
        Self(format!("{}.{}", self.0, DEFAULT_SOURCE_EXTENSION))
    }

    /// Resolve a relative or root-relative specifier against this file
    ///
    /// `./x` resolves within this file's directory, each `../` pops one
    /// directory segment (clamped at the project root), and a leading `/`
    /// resolves from the root. The specifier is normalized like any other
    /// path input.
    #[must_use]
    pub fn resolve(&self, specifier: &str) -> Self {
        if let Some(rooted) = specifier.strip_prefix('/') {
            return Self::new(rooted);
        }
        let dir = self.directory();
        if dir.0.is_empty() {
            Self::new(specifier)
        } else {
            Self::new(format!("{}/{}", dir.0, specifier))
        }
    }
}

impl Display for ProjectPath {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for ProjectPath {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for ProjectPath {
    fn from(raw: String) -> Self {
        Self::new(raw)
    }
}
