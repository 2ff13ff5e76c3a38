//! Configuration management for todo-agent.
//!
//! Configuration can be set via environment variables:
//! - `OPENAI_API_KEY` - Required. API key for the chat-completions service.
//! - `OPENAI_BASE_URL` - Optional. Endpoint base URL. Defaults to `https://api.openai.com/v1`.
//! - `DEFAULT_MODEL` - Optional. The model to use. Defaults to `gpt-4o`.
//! - `TODO_DB_PATH` - Optional. Path to the task database. Defaults to `todos.db`.
//! - `MAX_STEPS` - Optional. Maximum model calls per user turn. Defaults to `10`.
//! - `REQUEST_TIMEOUT_SECS` - Optional. Model call timeout. Defaults to `60`.

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Invalid value for {0}: {1}")]
    InvalidValue(String, String),
}

/// Assistant configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// API key for the chat-completions service
    pub api_key: String,

    /// Base URL of the OpenAI-compatible endpoint (no trailing slash)
    pub base_url: String,

    /// Model identifier sent with every completion request
    pub model: String,

    /// Path to the SQLite task database
    pub db_path: PathBuf,

    /// Maximum model calls per user turn before the turn is abandoned
    pub max_steps: usize,

    /// Timeout applied to each model call
    pub request_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::MissingEnvVar` if `OPENAI_API_KEY` is not set.
    pub fn from_env() -> Result<Self, ConfigError> {
        let api_key = std::env::var("OPENAI_API_KEY")
            .map_err(|_| ConfigError::MissingEnvVar("OPENAI_API_KEY".to_string()))?;

        let base_url = std::env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string())
            .trim_end_matches('/')
            .to_string();

        let model = std::env::var("DEFAULT_MODEL").unwrap_or_else(|_| "gpt-4o".to_string());

        let db_path = std::env::var("TODO_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("todos.db"));

        let max_steps = std::env::var("MAX_STEPS")
            .unwrap_or_else(|_| "10".to_string())
            .parse()
            .map_err(|e| ConfigError::InvalidValue("MAX_STEPS".to_string(), format!("{}", e)))?;

        let timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "60".to_string())
            .parse()
            .map_err(|e| {
                ConfigError::InvalidValue("REQUEST_TIMEOUT_SECS".to_string(), format!("{}", e))
            })?;

        Ok(Self {
            api_key,
            base_url,
            model,
            db_path,
            max_steps,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }

    /// Create a config with custom values (useful for testing).
    pub fn new(api_key: String, model: String, db_path: PathBuf) -> Self {
        Self {
            api_key,
            base_url: "https://api.openai.com/v1".to_string(),
            model,
            db_path,
            max_steps: 10,
            request_timeout: Duration::from_secs(60),
        }
    }
}
