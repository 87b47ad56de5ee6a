//! Source inlining / flattening
//!
//! Produces a single flat, module-free script body starting from one root
//! file, by depth-first recursive inlining:
//! - known-library imports become bindings to runtime-exposed globals,
//! - local-file imports are replaced by the referenced file's recursively
//!   flattened body with its exports rewritten into local declarations,
//! - stylesheet imports are removed (styles are aggregated separately),
//! - unresolvable imports are left untouched (fail-open).
//!
//! The rewriting is textual and best-effort by design; it is isolated in
//! this module and [`crate::imports`] so a real parser could replace it
//! without touching the assembler or the orchestrator.

use crate::error::PreviewError;
use crate::imports::{extract_statements, ImportStatement};
use crate::resolve::{resolve, ResolvedReference};
use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::{HashMap, HashSet};
use std::ops::Range;
use vibeforge_project::{FileMap, ProjectPath};

/// Local name the root file's default export is bound to; the document
/// assembler mounts this symbol.
pub const ENTRY_SYMBOL: &str = "App";

static RE_DEFAULT_FN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"export\s+default\s+(?P<asyncness>async\s+)?function(?:\s+(?P<name>\w+))?")
        .expect("default function pattern is valid")
});
static RE_DEFAULT_CLASS: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"export\s+default\s+class(?:\s+(?P<name>\w+))?")
        .expect("default class pattern is valid")
});
static RE_DEFAULT_IDENT: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"export\s+default\s+(?P<ident>\w+)\s*;?").expect("default ident pattern is valid")
});
static RE_DEFAULT_ANY: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"export\s+default\s+").expect("default pattern is valid"));
static RE_NAMED_DECL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"export\s+(?P<decl>(?:async\s+)?(?:const|let|var|function|class)\s)")
        .expect("named declaration pattern is valid")
});
static RE_EXPORT_LIST: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"export\s*\{[^}]*\}\s*;?").expect("export list pattern is valid"));

/// Flatten a root file into one module-free script body
///
/// The root's default export is bound under [`ENTRY_SYMBOL`].
///
/// # Errors
/// [`PreviewError::MissingRoot`] if the root is absent from the map,
/// [`PreviewError::CircularImport`] if local files import each other
/// transitively.
pub fn flatten_root(files: &FileMap, root: &ProjectPath) -> Result<String, PreviewError> {
    if !files.contains(root) {
        return Err(PreviewError::MissingRoot { path: root.clone() });
    }
    let mut inliner = Inliner {
        files,
        in_progress: HashSet::new(),
        completed: HashMap::new(),
        external_bound: HashSet::new(),
    };
    inliner.flatten(root, Some(ENTRY_SYMBOL))
}

struct Inliner<'a> {
    files: &'a FileMap,
    /// Files on the active recursion stack; re-entry is a circular import.
    in_progress: HashSet<ProjectPath>,
    /// Files already inlined for this root, with the name their default
    /// export was bound under. Diamond dependencies inline once; later
    /// default imports alias the first binding.
    completed: HashMap<ProjectPath, Option<String>>,
    /// External binding names already declared somewhere in the flattened
    /// output. Re-declaring a `const` would be a script-level syntax
    /// error, so repeats across inlined files collapse to nothing.
    external_bound: HashSet<String>,
}

impl Inliner<'_> {
    fn flatten(
        &mut self,
        path: &ProjectPath,
        default_local: Option<&str>,
    ) -> Result<String, PreviewError> {
        if self.in_progress.contains(path) {
            return Err(PreviewError::CircularImport { path: path.clone() });
        }
        if let Some(existing) = self.completed.get(path) {
            return Ok(match (default_local, existing) {
                (Some(local), Some(bound)) if local != bound => {
                    format!("const {local} = {bound};")
                }
                _ => String::new(),
            });
        }

        let source = self
            .files
            .get(path)
            .ok_or_else(|| PreviewError::MissingFile { path: path.clone() })?;

        self.in_progress.insert(path.clone());
        let outcome = self.flatten_source(source, path, default_local);
        self.in_progress.remove(path);

        let (body, default_binding) = outcome?;
        self.completed.insert(path.clone(), default_binding);
        Ok(body)
    }

    fn flatten_source(
        &mut self,
        source: &str,
        path: &ProjectPath,
        default_local: Option<&str>,
    ) -> Result<(String, Option<String>), PreviewError> {
        let statements = extract_statements(source);
        let mut body = source.to_string();
        let mut prelude: Vec<String> = Vec::new();

        for statement in &statements {
            match resolve(&statement.specifier, path, self.files) {
                ResolvedReference::ExternalGlobal(global) => {
                    let bindings = self.external_bindings(statement, global);
                    body = body.replacen(&statement.raw, &bindings, 1);
                }
                ResolvedReference::LocalFile(resolved) => {
                    let inlined =
                        self.flatten(&resolved, statement.default_binding.as_deref())?;
                    if !inlined.is_empty() {
                        prelude.push(inlined);
                    }
                    body = body.replacen(&statement.raw, "", 1);
                }
                ResolvedReference::StyleAsset => {
                    body = body.replacen(&statement.raw, "", 1);
                }
                ResolvedReference::Unresolvable => {
                    // Fail-open: the statement stays; any consequence lands
                    // in the rendered document's error panel.
                    tracing::debug!(
                        specifier = %statement.specifier,
                        file = %path,
                        "leaving unresolvable import in place"
                    );
                }
            }
        }

        let (body, default_binding) = rewrite_exports(&body, &fallback_name(path), default_local);

        if prelude.is_empty() {
            return Ok((body, default_binding));
        }
        let mut out = String::new();
        for segment in prelude {
            out.push_str(&segment);
            out.push_str("\n\n");
        }
        out.push_str(&body);
        Ok((out, default_binding))
    }

    /// Bindings replacing an external-library import statement
    ///
    /// A default binding whose local name equals the exposed global is
    /// ambient already (the assembler injects the runtimes), so the
    /// statement is simply removed. Every emitted name is declared at most
    /// once across the whole flattened output.
    fn external_bindings(&mut self, statement: &ImportStatement, global: &str) -> String {
        let mut lines = Vec::new();
        if let Some(name) = &statement.default_binding {
            if name != global && self.external_bound.insert(name.clone()) {
                lines.push(format!("const {name} = window.{global};"));
            }
        }
        for named in &statement.named_bindings {
            if self.external_bound.insert(named.local.clone()) {
                lines.push(format!(
                    "const {local} = window.{global}.{imported};",
                    local = named.local,
                    imported = named.imported
                ));
            }
        }
        lines.join("\n")
    }
}

/// Rewrite a file's export statements into local-scope declarations
///
/// Returns the rewritten body and the name the default export (if any) is
/// bound under. `default_local` is the importer's chosen local name; when
/// absent, named default declarations keep their own name and anonymous
/// defaults bind under `fallback`.
fn rewrite_exports(
    body: &str,
    fallback: &str,
    default_local: Option<&str>,
) -> (String, Option<String>) {
    let mut out = body.to_string();
    let mut default_binding: Option<String> = None;

    if let Some(caps) = RE_DEFAULT_FN.captures(&out) {
        let range = whole_range(&caps);
        let asyncness = caps.name("asyncness").map_or("", |m| m.as_str()).to_string();
        match caps.name("name").map(|m| m.as_str().to_string()) {
            Some(name) => {
                out.replace_range(range, &format!("{asyncness}function {name}"));
                if let Some(local) = default_local {
                    if local != name {
                        out.push_str(&format!("\nconst {local} = {name};"));
                    }
                }
                default_binding = Some(name);
            }
            None => {
                let bound = default_local.unwrap_or(fallback).to_string();
                out.replace_range(range, &format!("const {bound} = {asyncness}function"));
                default_binding = Some(bound);
            }
        }
    } else if let Some(caps) = RE_DEFAULT_CLASS.captures(&out) {
        let range = whole_range(&caps);
        match caps.name("name").map(|m| m.as_str().to_string()) {
            Some(name) => {
                out.replace_range(range, &format!("class {name}"));
                if let Some(local) = default_local {
                    if local != name {
                        out.push_str(&format!("\nconst {local} = {name};"));
                    }
                }
                default_binding = Some(name);
            }
            None => {
                let bound = default_local.unwrap_or(fallback).to_string();
                out.replace_range(range, &format!("const {bound} = class"));
                default_binding = Some(bound);
            }
        }
    } else if let Some(caps) = RE_DEFAULT_IDENT
        .captures(&out)
        .filter(|caps| caps.name("ident").is_some_and(|m| !is_keyword(m.as_str())))
    {
        let range = whole_range(&caps);
        let ident = caps.name("ident").map_or("", |m| m.as_str()).to_string();
        let replacement = match default_local {
            Some(local) if local != ident => format!("const {local} = {ident};"),
            _ => String::new(),
        };
        out.replace_range(range, &replacement);
        default_binding = Some(ident);
    } else if let Some(found) = RE_DEFAULT_ANY.find(&out) {
        let range = found.range();
        let bound = default_local.unwrap_or(fallback).to_string();
        out.replace_range(range, &format!("const {bound} = "));
        default_binding = Some(bound);
    }

    let out = RE_NAMED_DECL.replace_all(&out, "${decl}").into_owned();
    let out = RE_EXPORT_LIST.replace_all(&out, "").into_owned();
    (out, default_binding)
}

fn whole_range(caps: &regex::Captures<'_>) -> Range<usize> {
    caps.get(0).map_or(0..0, |m| m.range())
}

fn is_keyword(ident: &str) -> bool {
    matches!(
        ident,
        "function" | "class" | "async" | "await" | "new" | "typeof" | "void"
    )
}

/// Binding name synthesized from a file stem for default exports imported
/// without a default binding (named-only imports of a defaulted module).
fn fallback_name(path: &ProjectPath) -> String {
    let stem = path
        .file_name()
        .map(|name| match name.rfind('.') {
            Some(dot) if dot > 0 => &name[..dot],
            _ => name,
        })
        .unwrap_or("module");
    let mut out: String = stem
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    if out.chars().next().is_some_and(|c| c.is_ascii_digit()) {
        out.insert(0, '_');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn path(p: &str) -> ProjectPath {
        ProjectPath::new(p)
    }

    #[test]
    fn flat_input_is_unchanged() {
        let source = "function App() { return null; }\nconst x = 1;\n";
        let files = FileMap::from_iter([("src/App.tsx", source)]);
        let out = flatten_root(&files, &path("src/App.tsx")).unwrap();
        assert_eq!(out, source);
    }

    #[test]
    fn root_default_function_keeps_name() {
        let files = FileMap::from_iter([(
            "src/App.tsx",
            "export default function App(){ return <div>Hi</div> }",
        )]);
        let out = flatten_root(&files, &path("src/App.tsx")).unwrap();
        assert_eq!(out, "function App(){ return <div>Hi</div> }");
        assert!(!out.contains("export"));
    }

    #[test]
    fn root_default_ident_statement_removed() {
        let files = FileMap::from_iter([(
            "src/App.tsx",
            "function App() { return null; }\nexport default App;\n",
        )]);
        let out = flatten_root(&files, &path("src/App.tsx")).unwrap();
        assert!(!out.contains("export"));
        assert!(out.contains("function App()"));
    }

    #[test]
    fn root_default_with_other_name_gets_entry_alias() {
        let files = FileMap::from_iter([(
            "src/App.tsx",
            "export default function Main() { return null; }",
        )]);
        let out = flatten_root(&files, &path("src/App.tsx")).unwrap();
        assert!(out.contains("function Main()"));
        assert!(out.contains("const App = Main;"));
    }

    #[test]
    fn root_default_expression_binds_entry_symbol() {
        let files = FileMap::from_iter([("src/App.tsx", "export default () => <div/>;\n")]);
        let out = flatten_root(&files, &path("src/App.tsx")).unwrap();
        assert!(out.starts_with("const App = () => <div/>;"));
    }

    #[test]
    fn external_import_matching_global_is_ambient() {
        let files = FileMap::from_iter([(
            "src/App.tsx",
            "import React from 'react';\nexport default function App(){ return null; }",
        )]);
        let out = flatten_root(&files, &path("src/App.tsx")).unwrap();
        // The assembler injects window.React; rebinding the same name
        // would only shadow it.
        assert!(!out.contains("const React"));
        assert!(!out.contains("import"));
    }

    #[test]
    fn external_import_with_other_name_binds_global() {
        let files = FileMap::from_iter([(
            "src/App.tsx",
            "import * as Dom from 'react-dom/client';\nconst x = 1;",
        )]);
        let out = flatten_root(&files, &path("src/App.tsx")).unwrap();
        assert!(out.contains("const Dom = window.ReactDOM;"));
    }

    #[test]
    fn external_bindings_deduplicate_across_files() {
        let files = FileMap::from_iter([
            (
                "src/App.tsx",
                "import { useState } from 'react';\nimport B from './B';\nexport default function App(){}",
            ),
            ("src/B.tsx", "import { useState } from 'react';\nexport default function B(){}"),
        ]);
        let out = flatten_root(&files, &path("src/App.tsx")).unwrap();
        assert_eq!(
            out.matches("const useState = window.React.useState;").count(),
            1,
            "repeated external bindings must collapse to one declaration"
        );
    }

    #[test]
    fn external_named_import_binds_members() {
        let files = FileMap::from_iter([(
            "src/App.tsx",
            "import { useState as useS, useEffect } from 'react';\nconst x = 1;",
        )]);
        let out = flatten_root(&files, &path("src/App.tsx")).unwrap();
        assert!(out.contains("const useS = window.React.useState;"));
        assert!(out.contains("const useEffect = window.React.useEffect;"));
    }

    #[test]
    fn local_import_inlines_with_binding() {
        let files = FileMap::from_iter([
            (
                "src/App.tsx",
                "import X from './B';\nexport default function App(){ return <X/>; }",
            ),
            ("src/B.tsx", "export default function X(){ return null; }"),
        ]);
        let out = flatten_root(&files, &path("src/App.tsx")).unwrap();
        assert!(out.contains("function X(){ return null; }"));
        assert!(out.contains("function App(){ return <X/>; }"));
        assert!(!out.contains("import"));
        assert!(!out.contains("export"));
    }

    #[test]
    fn local_import_alias_rebinds_default() {
        let files = FileMap::from_iter([
            ("src/App.tsx", "import Widget from './B';\nconst y = <Widget/>;"),
            ("src/B.tsx", "export default function X(){ return null; }"),
        ]);
        let out = flatten_root(&files, &path("src/App.tsx")).unwrap();
        assert!(out.contains("function X(){ return null; }"));
        assert!(out.contains("const Widget = X;"));
    }

    #[test]
    fn named_exports_become_local_declarations() {
        let files = FileMap::from_iter([
            ("src/App.tsx", "import { helper } from './util';\nhelper();"),
            (
                "src/util.tsx",
                "export const helper = () => 1;\nexport function other() {}\n",
            ),
        ]);
        let out = flatten_root(&files, &path("src/App.tsx")).unwrap();
        assert!(out.contains("const helper = () => 1;"));
        assert!(out.contains("function other() {}"));
        assert!(!out.contains("export"));
    }

    #[test]
    fn export_list_statement_is_removed() {
        let files = FileMap::from_iter([
            ("src/App.tsx", "import { a } from './util';\na();"),
            ("src/util.tsx", "const a = 1;\nconst b = 2;\nexport { a, b };\n"),
        ]);
        let out = flatten_root(&files, &path("src/App.tsx")).unwrap();
        assert!(out.contains("const a = 1;"));
        assert!(!out.contains("export"));
    }

    #[test]
    fn style_import_is_removed_silently() {
        let files = FileMap::from_iter([(
            "src/App.tsx",
            "import styles from './index.css';\nconst x = 1;",
        )]);
        let out = flatten_root(&files, &path("src/App.tsx")).unwrap();
        assert!(!out.contains("import"));
        assert!(out.contains("const x = 1;"));
    }

    #[test]
    fn unresolvable_import_left_untouched() {
        let source = "import { Send } from 'lucide-react';\nconst x = 1;";
        let files = FileMap::from_iter([("src/App.tsx", source)]);
        let out = flatten_root(&files, &path("src/App.tsx")).unwrap();
        assert!(out.contains("import { Send } from 'lucide-react';"));
    }

    #[test]
    fn cycle_is_a_distinct_error() {
        let files = FileMap::from_iter([
            ("src/A.tsx", "import B from './B';\nexport default function A(){}"),
            ("src/B.tsx", "import A from './A';\nexport default function B(){}"),
        ]);
        let err = flatten_root(&files, &path("src/A.tsx")).unwrap_err();
        assert!(matches!(err, PreviewError::CircularImport { .. }));
    }

    #[test]
    fn self_import_is_a_cycle() {
        let files = FileMap::from_iter([(
            "src/A.tsx",
            "import A from './A';\nexport default function A(){}",
        )]);
        let err = flatten_root(&files, &path("src/A.tsx")).unwrap_err();
        assert_eq!(
            err,
            PreviewError::CircularImport {
                path: path("src/A.tsx")
            }
        );
    }

    #[test]
    fn diamond_dependency_inlines_once() {
        let files = FileMap::from_iter([
            (
                "src/App.tsx",
                "import B from './B';\nimport C from './C';\nexport default function App(){ return [B, C]; }",
            ),
            ("src/B.tsx", "import D from './D';\nexport default function B(){ return D; }"),
            ("src/C.tsx", "import D from './D';\nexport default function C(){ return D; }"),
            ("src/D.tsx", "export default function D(){ return null; }"),
        ]);
        let out = flatten_root(&files, &path("src/App.tsx")).unwrap();
        assert_eq!(
            out.matches("function D(){ return null; }").count(),
            1,
            "shared leaf must inline exactly once"
        );
        assert!(!out.contains("import"));
    }

    #[test]
    fn diamond_with_renamed_default_aliases_first_binding() {
        let files = FileMap::from_iter([
            (
                "src/App.tsx",
                "import First from './B';\nimport Second from './C';\nexport default function App(){}",
            ),
            ("src/B.tsx", "import Leaf from './D';\nexport default function B(){}"),
            ("src/C.tsx", "import Renamed from './D';\nexport default function C(){}"),
            ("src/D.tsx", "export default function Leaf(){}"),
        ]);
        let out = flatten_root(&files, &path("src/App.tsx")).unwrap();
        assert_eq!(out.matches("function Leaf(){}").count(), 1);
        assert!(out.contains("const Renamed = Leaf;"));
    }

    #[test]
    fn missing_root_is_an_error() {
        let files = FileMap::new();
        let err = flatten_root(&files, &path("src/App.tsx")).unwrap_err();
        assert!(matches!(err, PreviewError::MissingRoot { .. }));
    }

    #[test]
    fn fallback_name_sanitizes_stems() {
        assert_eq!(fallback_name(&path("src/Button.tsx")), "Button");
        assert_eq!(fallback_name(&path("src/my-util.ts")), "my_util");
        assert_eq!(fallback_name(&path("src/2cool.tsx")), "_2cool");
    }

    #[test]
    fn rewrite_exports_async_function() {
        let (out, binding) =
            rewrite_exports("export default async function go() {}", "F", Some("go"));
        assert_eq!(out, "async function go() {}");
        assert_eq!(binding.as_deref(), Some("go"));
    }

    #[test]
    fn rewrite_exports_default_class() {
        let (out, binding) =
            rewrite_exports("export default class Panel {}", "F", Some("Widget"));
        assert!(out.contains("class Panel {}"));
        assert!(out.contains("const Widget = Panel;"));
        assert_eq!(binding.as_deref(), Some("Panel"));
    }

    #[test]
    fn rewrite_exports_no_default() {
        let (out, binding) = rewrite_exports("export const a = 1;", "F", Some("X"));
        assert_eq!(out, "const a = 1;");
        assert_eq!(binding, None);
    }
}
