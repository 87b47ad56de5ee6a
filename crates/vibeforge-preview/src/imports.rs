//! Module reference extraction
//!
//! Scans one source text for top-level `import ... from '<specifier>'`
//! statements with a conservative pattern: an optional default (or
//! namespace) identifier, an optional brace-delimited list of named
//! identifiers, and a quoted specifier. Statements that do not match are
//! left in place — a missed import either works through ambient globals or
//! surfaces inside the rendered preview's error panel, never as a pipeline
//! failure.

use once_cell::sync::Lazy;
use regex::Regex;

/// `import Default, { a, b as c } from 'specifier'` and friends.
/// Namespace form (`* as ns`) binds like a default import of the whole
/// module object.
static IMPORT_STATEMENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r#"import\s+(?:\*\s+as\s+(?P<ns>\w+)|(?P<default>\w+))?\s*,?\s*(?:\{(?P<named>[^}]*)\})?\s*from\s+['"](?P<spec>[^'"]+)['"];?"#,
    )
    .expect("import statement pattern is valid")
});

/// One binding introduced by an import statement
///
/// `local_name` is the identifier bound in the importing file's scope,
/// after alias renaming (`{ a as b }` binds `b`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportBinding {
    /// Identifier bound locally
    pub local_name: String,
    /// Specifier the binding is imported from
    pub source_specifier: String,
    /// Default/namespace binding vs named binding
    pub is_default: bool,
}

/// A named binding with its exported and local identifiers
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedBinding {
    /// Identifier as exported by the source module
    pub imported: String,
    /// Identifier bound locally (differs under `as` renaming)
    pub local: String,
}

/// One matched import statement
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportStatement {
    /// Exact matched statement text, for later splicing
    pub raw: String,
    /// Quoted module specifier
    pub specifier: String,
    /// Default or namespace binding, if present
    pub default_binding: Option<String>,
    /// Named bindings in declaration order
    pub named_bindings: Vec<NamedBinding>,
}

impl ImportStatement {
    /// Flatten into the per-binding view
    #[must_use]
    pub fn bindings(&self) -> Vec<ImportBinding> {
        let mut out = Vec::new();
        if let Some(name) = &self.default_binding {
            out.push(ImportBinding {
                local_name: name.clone(),
                source_specifier: self.specifier.clone(),
                is_default: true,
            });
        }
        for named in &self.named_bindings {
            out.push(ImportBinding {
                local_name: named.local.clone(),
                source_specifier: self.specifier.clone(),
                is_default: false,
            });
        }
        out
    }
}

/// Extract every matching import statement, ordered by position
#[must_use]
pub fn extract_statements(source: &str) -> Vec<ImportStatement> {
    IMPORT_STATEMENT
        .captures_iter(source)
        .filter_map(|caps| {
            let default_binding = caps
                .name("ns")
                .or_else(|| caps.name("default"))
                .map(|m| m.as_str().to_string());
            let named_bindings = caps
                .name("named")
                .map(|m| parse_named_list(m.as_str()))
                .unwrap_or_default();
            // `import from 'x'` with no bindings at all is not a statement
            // this pipeline understands; leave it for the fail-open path.
            if default_binding.is_none() && named_bindings.is_empty() {
                return None;
            }
            Some(ImportStatement {
                raw: caps.get(0).map(|m| m.as_str().to_string())?,
                specifier: caps.name("spec")?.as_str().to_string(),
                default_binding,
                named_bindings,
            })
        })
        .collect()
}

/// Extract the flat binding list for a source text
#[must_use]
pub fn extract_bindings(source: &str) -> Vec<ImportBinding> {
    extract_statements(source)
        .iter()
        .flat_map(ImportStatement::bindings)
        .collect()
}

/// Parse the interior of a `{ ... }` named-import list
fn parse_named_list(interior: &str) -> Vec<NamedBinding> {
    interior
        .split(',')
        .filter_map(|entry| {
            let entry = entry.trim();
            if entry.is_empty() {
                return None;
            }
            let mut tokens = entry.split_whitespace();
            let imported = tokens.next()?.to_string();
            let local = match (tokens.next(), tokens.next()) {
                (Some("as"), Some(alias)) => alias.to_string(),
                _ => imported.clone(),
            };
            Some(NamedBinding { imported, local })
        })
        .collect()
}
