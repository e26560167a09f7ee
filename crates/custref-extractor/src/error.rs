//! Error types for the Extractor

use custref_domain::ValidationError;
use thiserror::Error;

/// Reasons an extraction falls back to the default criteria
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ExtractorError {
    /// LLM provider error
    #[error("LLM error: {0}")]
    Llm(String),

    /// Prompt exceeds maximum length
    #[error("Prompt too long: {0} chars (max: {1})")]
    PromptTooLong(usize, usize),

    /// Model output is not a JSON object
    #[error("Malformed model output: {0}")]
    MalformedOutput(String),

    /// Model output failed criteria validation
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl From<serde_json::Error> for ExtractorError {
    fn from(e: serde_json::Error) -> Self {
        ExtractorError::MalformedOutput(format!("JSON parse error: {}", e))
    }
}
