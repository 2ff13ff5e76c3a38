//! Error types for the LLM client, with transient-error classification
//! used by the retry logic.

use std::time::Duration;
use thiserror::Error;

/// Why a model call failed.
///
/// Every variant is turn-fatal from the agent loop's perspective; the
/// distinction here only decides whether the client retries internally
/// before giving up.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request timed out after {0:?}")]
    Timeout(Duration),

    #[error("rate limited by the model service: {0}")]
    RateLimited(String),

    #[error("model service error (HTTP {status}): {body}")]
    Server { status: u16, body: String },

    #[error("request rejected (HTTP {status}): {body}")]
    Client { status: u16, body: String },

    #[error("could not parse model service response: {0}")]
    Parse(String),

    #[error("model returned an empty reply")]
    Empty,
}

impl LlmError {
    /// Whether retrying the same request could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            LlmError::Network(_)
                | LlmError::Timeout(_)
                | LlmError::RateLimited(_)
                | LlmError::Server { .. }
        )
    }
}

/// Classify an HTTP error status into an [`LlmError`].
pub fn classify_http_status(status: u16, body: String) -> LlmError {
    match status {
        429 => LlmError::RateLimited(body),
        500..=599 => LlmError::Server { status, body },
        _ => LlmError::Client { status, body },
    }
}

/// Retry policy for transient failures.
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Retries after the initial attempt.
    pub max_retries: u32,
    /// Fixed delay between attempts.
    pub backoff: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 2,
            backoff: Duration::from_secs(2),
        }
    }
}
