//! Stylesheet aggregation
//!
//! Styles are not inlined into the script: every style asset in the file
//! map is concatenated (in map iteration order) into one block for the
//! document's `<style>` tag, with build-tool-only at-rules stripped by
//! literal pattern removal.

use once_cell::sync::Lazy;
use regex::Regex;
use vibeforge_project::FileMap;

/// `@tailwind base/components/utilities;` lines are meaningful only to the
/// Tailwind build; the preview loads the CDN runtime instead.
static BUILD_DIRECTIVE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"@tailwind (base|components|utilities);?\n?")
        .expect("tailwind directive pattern is valid")
});

/// Remove build-tool-only directives, preserving all other rules verbatim
#[must_use]
pub fn strip_build_directives(css: &str) -> String {
    BUILD_DIRECTIVE.replace_all(css, "").into_owned()
}

/// Concatenate every stylesheet in the file map, cleaned, in map order
#[must_use]
pub fn collect_styles(files: &FileMap) -> String {
    let cleaned: Vec<String> = files
        .style_entries()
        .map(|(_, content)| strip_build_directives(content))
        .collect();
    cleaned.join("\n\n")
}
