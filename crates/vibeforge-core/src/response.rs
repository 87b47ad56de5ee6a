//! Execution response extraction
//!
//! The execution model is asked for JSON only, but responses routinely
//! arrive wrapped in prose or code fences. The payload is located as the
//! first-`{`-to-last-`}` span of the raw text and parsed from there;
//! anything outside the span is ignored.

use crate::error::ResponseParseError;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use vibeforge_project::ProjectPath;

/// Parsed execution payload
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionResponse {
    /// Whole-file replacements keyed by project path
    #[serde(default)]
    pub updated_files: IndexMap<ProjectPath, String>,
    /// Model's one-line description of what changed
    #[serde(default)]
    pub execution_summary: String,
}

/// Locate the JSON object span inside raw model text
#[must_use]
pub fn extract_json_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&text[start..=end])
}

/// Parse the execution payload out of raw model text
///
/// # Errors
/// [`ResponseParseError::NoJsonObject`] when the text holds no `{ ... }`
/// span, [`ResponseParseError::Json`] when the span is not the expected
/// shape. Neither merges anything.
pub fn parse_execution_response(text: &str) -> Result<ExecutionResponse, ResponseParseError> {
    let span = extract_json_span(text).ok_or(ResponseParseError::NoJsonObject)?;
    let response: ExecutionResponse = serde_json::from_str(span)?;
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_bare_json() {
        let response = parse_execution_response(
            r#"{"updated_files":{"src/App.tsx":"X"},"execution_summary":"done"}"#,
        )
        .unwrap();
        assert_eq!(response.execution_summary, "done");
        assert_eq!(
            response.updated_files.get(&ProjectPath::new("src/App.tsx")),
            Some(&"X".to_string())
        );
    }

    #[test]
    fn tolerates_surrounding_prose() {
        let text = "Here you go:\n{\"updated_files\":{\"src/App.tsx\":\"X\"},\"execution_summary\":\"done\"}";
        let response = parse_execution_response(text).unwrap();
        assert_eq!(response.updated_files.len(), 1);
        assert_eq!(response.execution_summary, "done");
    }

    #[test]
    fn tolerates_code_fences() {
        let text = "```json\n{\"updated_files\":{},\"execution_summary\":\"noop\"}\n```";
        let response = parse_execution_response(text).unwrap();
        assert_eq!(response.execution_summary, "noop");
    }

    #[test]
    fn no_braces_is_no_json_object() {
        let err = parse_execution_response("I could not do that.").unwrap_err();
        assert!(matches!(err, ResponseParseError::NoJsonObject));
    }

    #[test]
    fn reversed_braces_is_no_json_object() {
        let err = parse_execution_response("} nothing {").unwrap_err();
        assert!(matches!(err, ResponseParseError::NoJsonObject));
    }

    #[test]
    fn invalid_json_span_is_a_parse_error() {
        let err = parse_execution_response("{\"updated_files\": oops}").unwrap_err();
        assert!(matches!(err, ResponseParseError::Json(_)));
    }

    #[test]
    fn missing_fields_default_to_empty() {
        let response = parse_execution_response("{}").unwrap();
        assert!(response.updated_files.is_empty());
        assert_eq!(response.execution_summary, "");
    }

    #[test]
    fn span_extraction_is_first_to_last() {
        assert_eq!(
            extract_json_span("a {\"x\": {\"y\": 1}} b"),
            Some("{\"x\": {\"y\": 1}}")
        );
    }
}
