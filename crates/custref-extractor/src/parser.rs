//! Parse LLM output into an untyped criteria object

use crate::error::ExtractorError;
use serde_json::{Map, Value};
use tracing::debug;

const JSON_FENCE: &str = "```json";
const FENCE: &str = "```";

/// Parse an LLM response into a JSON object
///
/// Code fences are stripped first (see [`strip_code_fence`]). Anything
/// other than a JSON object is rejected.
pub fn parse_llm_response(response: &str) -> Result<Map<String, Value>, ExtractorError> {
    let json_str = strip_code_fence(response);
    debug!(cleaned = %json_str, "Cleaned model output");

    let json: Value = serde_json::from_str(json_str)?;
    match json {
        Value::Object(map) => Ok(map),
        other => Err(ExtractorError::MalformedOutput(format!(
            "Expected JSON object, got {}",
            kind(&other)
        ))),
    }
}

/// Remove a wrapping code fence
///
/// Only an exactly paired fence is removed: the text must start with
/// ```` ```json ```` or ```` ``` ```` and end with ```` ``` ````, with the
/// opening and closing markers not overlapping. Any other shape comes back
/// trimmed but otherwise untouched.
pub fn strip_code_fence(response: &str) -> &str {
    let trimmed = response.trim();
    if !trimmed.ends_with(FENCE) {
        return trimmed;
    }

    let open = if trimmed.starts_with(JSON_FENCE) {
        JSON_FENCE.len()
    } else if trimmed.starts_with(FENCE) {
        FENCE.len()
    } else {
        return trimmed;
    };

    if trimmed.len() < open + FENCE.len() {
        return trimmed;
    }
    trimmed[open..trimmed.len() - FENCE.len()].trim()
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_raw_json() {
        let map = parse_llm_response(r#"{"industry": "retail", "limit": 3}"#).unwrap();
        assert_eq!(map["industry"], "retail");
        assert_eq!(map["limit"], 3);
    }

    #[test]
    fn test_parse_json_fenced() {
        let response = "```json\n{\"erp_system\": \"SAP\"}\n```";
        let map = parse_llm_response(response).unwrap();
        assert_eq!(map["erp_system"], "SAP");
    }

    #[test]
    fn test_parse_plain_fenced() {
        let response = "```\n{\"tenant\": \"Acme\"}\n```";
        let map = parse_llm_response(response).unwrap();
        assert_eq!(map["tenant"], "Acme");
    }

    #[test]
    fn test_surrounding_whitespace_is_ignored() {
        let response = "\n  ```json\n{}\n```  \n";
        assert!(parse_llm_response(response).unwrap().is_empty());
    }

    #[test]
    fn test_unpaired_fence_is_passed_through() {
        assert_eq!(strip_code_fence("```json\n{}"), "```json\n{}");
        assert_eq!(strip_code_fence("{}\n```"), "{}\n```");
        assert!(parse_llm_response("```json\n{}").is_err());
    }

    #[test]
    fn test_lone_fence_markers() {
        assert_eq!(strip_code_fence("```"), "```");
        assert_eq!(strip_code_fence("``````"), "");
        assert_eq!(strip_code_fence("```json```"), "");
    }

    #[test]
    fn test_prose_around_json_fails() {
        let result = parse_llm_response("Here you go: {\"industry\": \"retail\"}");
        assert!(matches!(result, Err(ExtractorError::MalformedOutput(_))));
    }

    #[test]
    fn test_non_object_rejected() {
        let err = parse_llm_response("[1, 2]").unwrap_err();
        assert_eq!(
            err,
            ExtractorError::MalformedOutput("Expected JSON object, got an array".to_string())
        );
    }
}
