//! Plan instructions
//!
//! The planning call returns free-form text. It is never structurally
//! parsed beyond pulling out `### File:` headings for display; the text
//! itself stays user-editable until approved or rejected.

use once_cell::sync::Lazy;
use regex::Regex;

static FILE_HEADING: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"### File:\s*([^\n]+)").expect("file heading pattern is valid"));

/// Generated implementation instructions awaiting approval
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanInstructions {
    /// Full instruction text, user-editable in place
    pub instructions: String,
    /// File paths mentioned in `### File:` headings, for display
    pub files_to_modify: Vec<String>,
    /// Fixed summary line
    pub summary: String,
}

impl PlanInstructions {
    /// Build from raw planning-call output
    #[must_use]
    pub fn from_text(text: impl Into<String>) -> Self {
        let instructions = text.into();
        let files_to_modify = extract_file_paths(&instructions);
        Self {
            instructions,
            files_to_modify,
            summary: "Implementation instructions generated".to_string(),
        }
    }

    /// Replace the instruction text, re-deriving the file list
    pub fn edit(&mut self, text: impl Into<String>) {
        self.instructions = text.into();
        self.files_to_modify = extract_file_paths(&self.instructions);
    }
}

/// Distinct `### File:` paths in first-appearance order
#[must_use]
pub fn extract_file_paths(instructions: &str) -> Vec<String> {
    let mut paths = Vec::new();
    for caps in FILE_HEADING.captures_iter(instructions) {
        if let Some(path) = caps.get(1) {
            let path = path.as_str().trim().to_string();
            if !path.is_empty() && !paths.contains(&path) {
                paths.push(path);
            }
        }
    }
    paths
}
