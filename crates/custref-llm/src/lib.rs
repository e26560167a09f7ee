//! custref LLM Provider Layer
//!
//! Implementations of the `LlmProvider` trait from `custref-domain`. The
//! criteria extractor only ever sees the trait; which backend answers is a
//! configuration decision.
//!
//! # Providers
//!
//! - `MockProvider`: Deterministic mock for testing
//! - `OllamaProvider`: Local Ollama API integration
//! - `AzureOpenAiProvider`: Azure OpenAI chat completions
//! - `Provider`: Runtime selection between the above
//!
//! All network providers ask for deterministic output (temperature 0) and
//! use the backend's JSON mode for structured generation.
//!
//! # Examples
//!
//! ```
//! use custref_llm::MockProvider;
//! use custref_domain::traits::LlmProvider;
//!
//! let provider = MockProvider::new(r#"{"industry": "retail"}"#);
//! let result = provider.generate("test prompt").unwrap();
//! assert_eq!(result, r#"{"industry": "retail"}"#);
//! ```

#![warn(missing_docs)]

pub mod azure;
mod http;
pub mod mock;
pub mod ollama;
pub mod provider;

use thiserror::Error;

pub use azure::AzureOpenAiProvider;
pub use mock::MockProvider;
pub use ollama::OllamaProvider;
pub use provider::Provider;

/// Errors that can occur during LLM operations
#[derive(Error, Debug)]
pub enum LlmError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// Invalid response from LLM
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Credentials rejected by the backend
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// Model or deployment not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Provider is missing required settings
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    /// Generic error
    #[error("LLM error: {0}")]
    Other(String),
}

/// Run a provider future to completion from synchronous code
///
/// Each call gets its own current-thread runtime, so concurrent pipeline
/// runs on separate threads never share one.
pub(crate) fn block_on<F, T>(future: F) -> Result<T, LlmError>
where
    F: std::future::Future<Output = Result<T, LlmError>>,
{
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| LlmError::Other(format!("Failed to start runtime: {}", e)))?
        .block_on(future)
}
