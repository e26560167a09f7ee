//! Error types for the record store

use thiserror::Error;

/// Record store errors
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StoreError {
    /// Login rejected or token invalid
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Network failure (DNS, refused connection, timeout)
    #[error("Connection error: {0}")]
    Connection(String),

    /// The store answered with an error status
    #[error("Query failed (HTTP {status}): {message}")]
    Query {
        /// HTTP status code
        status: u16,
        /// Error body returned by the store
        message: String,
    },

    /// Response body could not be decoded
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Required credentials are missing
    #[error("Store not configured: {0}")]
    NotConfigured(String),
}

impl From<reqwest::Error> for StoreError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_connect() || e.is_timeout() {
            StoreError::Connection(e.to_string())
        } else if e.is_decode() {
            StoreError::InvalidResponse(e.to_string())
        } else if let Some(status) = e.status() {
            StoreError::Query {
                status: status.as_u16(),
                message: e.to_string(),
            }
        } else {
            StoreError::Connection(e.to_string())
        }
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(e: serde_json::Error) -> Self {
        StoreError::InvalidResponse(format!("JSON parsing error: {}", e))
    }
}
