//! Trait definitions for external interactions
//!
//! These traits define the boundaries between the pipeline and the outside
//! world. Infrastructure implementations live in other crates.

use serde_json::Value;

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (custref-llm)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate text completion
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;

    /// Generate output constrained to a JSON object (if supported)
    fn generate_structured(&self, prompt: &str, schema: &str) -> Result<String, Self::Error>;
}

/// Trait for executing compiled queries against the record store
///
/// Implemented by the infrastructure layer (custref-store). The raw response
/// is returned untouched; shape normalization happens in the executor.
pub trait RecordStore {
    /// Error type for store operations
    type Error;

    /// Run a query and return the raw response body
    fn query(&self, query: &str) -> Result<Value, Self::Error>;
}
