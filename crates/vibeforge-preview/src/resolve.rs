//! Module specifier resolution
//!
//! Turns a raw import specifier plus the path of the importing file into a
//! canonical reference: a known runtime global, a local project file, a
//! style asset, or unresolvable. Unresolvable references are left untouched
//! downstream (best-effort policy, not a hard failure).

use vibeforge_project::{FileMap, ProjectPath};

/// Fixed table of libraries pre-loaded via CDN `<script>` tags in the
/// assembled document, keyed by specifier, valued by the global each UMD
/// build exposes.
pub const EXTERNAL_GLOBALS: &[(&str, &str)] = &[
    ("react", "React"),
    ("react-dom", "ReactDOM"),
    ("react-dom/client", "ReactDOM"),
    ("react/jsx-runtime", "React"),
];

/// Resolution of one import specifier
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResolvedReference {
    /// Library assumed pre-loaded under a known global name
    ExternalGlobal(&'static str),
    /// Local project file, canonical path
    LocalFile(ProjectPath),
    /// Stylesheet import, aggregated separately from the script
    StyleAsset,
    /// Not a known global, not a present local file
    Unresolvable,
}

/// Global name for a specifier in the fixed external-library table
#[must_use]
pub fn external_global(specifier: &str) -> Option<&'static str> {
    EXTERNAL_GLOBALS
        .iter()
        .find(|(spec, _)| *spec == specifier)
        .map(|(_, global)| *global)
}

/// Resolve a specifier against the importing file and the file map
///
/// Stylesheet specifiers resolve to [`ResolvedReference::StyleAsset`]
/// regardless of local/external shape. Local specifiers (`./`, `../`, `/`)
/// are joined against the importer's directory with `../` clamped at the
/// project root; an extensionless result gets the default source extension
/// appended before the file-map lookup.
#[must_use]
pub fn resolve(
    specifier: &str,
    importer: &ProjectPath,
    files: &FileMap,
) -> ResolvedReference {
    if is_style_specifier(specifier) {
        return ResolvedReference::StyleAsset;
    }

    if let Some(global) = external_global(specifier) {
        return ResolvedReference::ExternalGlobal(global);
    }

    if specifier.starts_with('.') || specifier.starts_with('/') {
        let joined = importer.resolve(specifier);
        let candidate = if joined.has_source_extension() {
            joined
        } else {
            joined.with_default_extension()
        };
        return if files.contains(&candidate) {
            ResolvedReference::LocalFile(candidate)
        } else {
            ResolvedReference::Unresolvable
        };
    }

    ResolvedReference::Unresolvable
}

fn is_style_specifier(specifier: &str) -> bool {
    vibeforge_project::STYLE_EXTENSIONS
        .iter()
        .any(|ext| specifier.ends_with(&format!(".{ext}")))
}
