//! Shared request loop for the HTTP providers

use crate::LlmError;
use reqwest::{RequestBuilder, Response, StatusCode};
use std::time::Duration;
use tracing::{debug, warn};

/// Default timeout for LLM requests (30 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Default number of attempts per request
pub const DEFAULT_MAX_RETRIES: u32 = 3;

/// Longest wait between two attempts is `2^MAX_BACKOFF_EXPONENT` seconds
const MAX_BACKOFF_EXPONENT: u32 = 5;

/// Build a client with the default timeout
pub(crate) fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        .build()
        .unwrap_or_default()
}

/// Send a request, retrying transient failures with exponential backoff
///
/// `make_request` is called once per attempt. Authentication failures and
/// missing models are returned immediately; server errors, rate limits and
/// transport failures are retried up to `max_retries` attempts in total.
pub(crate) async fn send_with_retry<F>(
    max_retries: u32,
    model: &str,
    make_request: F,
) -> Result<Response, LlmError>
where
    F: Fn() -> RequestBuilder,
{
    let attempts_allowed = max_retries.max(1);
    let mut attempts = 0;
    let mut last_error = None;

    while attempts < attempts_allowed {
        match make_request().send().await {
            Ok(response) => {
                let status = response.status();
                if status.is_success() {
                    return Ok(response);
                }
                match status {
                    StatusCode::NOT_FOUND => {
                        return Err(LlmError::ModelNotAvailable(model.to_string()));
                    }
                    StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                        let body = response.text().await.unwrap_or_default();
                        return Err(LlmError::Authentication(format!("HTTP {}: {}", status, body)));
                    }
                    StatusCode::TOO_MANY_REQUESTS => {
                        last_error = Some(LlmError::RateLimitExceeded);
                    }
                    _ => {
                        let error_text = response
                            .text()
                            .await
                            .unwrap_or_else(|_| "Unknown error".to_string());
                        last_error = Some(LlmError::Communication(format!(
                            "HTTP {}: {}",
                            status, error_text
                        )));
                    }
                }
            }
            Err(e) => {
                last_error = Some(LlmError::Communication(format!("Request failed: {}", e)));
            }
        }

        attempts += 1;
        if attempts < attempts_allowed {
            let delay = backoff_delay(attempts);
            warn!(attempt = attempts, ?delay, "LLM request failed, retrying");
            tokio::time::sleep(delay).await;
        }
    }

    debug!(attempts, "LLM request gave up");
    Err(last_error.unwrap_or_else(|| LlmError::Communication("Max retries exceeded".to_string())))
}

/// Wait before the next attempt: 1s, 2s, 4s, ... capped at 32s
fn backoff_delay(failed_attempts: u32) -> Duration {
    let exponent = failed_attempts.saturating_sub(1).min(MAX_BACKOFF_EXPONENT);
    Duration::from_secs(1 << exponent)
}
