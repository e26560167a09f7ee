//! Error types for the agent

use custref_domain::MappingError;
use custref_query::CompileError;
use custref_store::StoreError;
use thiserror::Error;

/// Pipeline failures that are not folded into a fallback
#[derive(Debug, Error)]
pub enum AgentError {
    /// Field mapping cannot address a required field
    #[error(transparent)]
    Compile(#[from] CompileError),

    /// Record store failed (only when store errors are surfaced)
    #[error("Record store error: {0}")]
    Store(#[from] StoreError),

    /// Field mapping cannot address a display column
    #[error("Formatting error: {0}")]
    Format(#[from] MappingError),
}
