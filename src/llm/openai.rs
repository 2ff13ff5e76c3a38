//! OpenAI-compatible chat-completions client with bounded retry for
//! transient errors.

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::error::{classify_http_status, LlmError, RetryConfig};
use super::{ChatMessage, ChatResponse, LlmClient, TokenUsage};
use crate::config::Config;

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
pub struct OpenAiClient {
    client: Client,
    api_key: String,
    url: String,
    model: String,
    request_timeout: Duration,
    retry_config: RetryConfig,
}

impl OpenAiClient {
    /// Create a client from the assistant configuration.
    pub fn new(config: &Config) -> Self {
        Self {
            client: Client::new(),
            api_key: config.api_key.clone(),
            url: format!("{}/chat/completions", config.base_url),
            model: config.model.clone(),
            request_timeout: config.request_timeout,
            retry_config: RetryConfig::default(),
        }
    }

    /// Override the retry policy (useful for testing).
    pub fn with_retry_config(mut self, retry_config: RetryConfig) -> Self {
        self.retry_config = retry_config;
        self
    }

    /// Execute a single request without retry.
    async fn execute_request(&self, request: &CompletionRequest<'_>) -> Result<ChatResponse, LlmError> {
        let response = match self
            .client
            .post(&self.url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .timeout(self.request_timeout)
            .json(request)
            .send()
            .await
        {
            Ok(r) => r,
            Err(e) => {
                if e.is_timeout() {
                    return Err(LlmError::Timeout(self.request_timeout));
                } else if e.is_connect() {
                    return Err(LlmError::Network(format!("connection failed: {}", e)));
                } else {
                    return Err(LlmError::Network(format!("request failed: {}", e)));
                }
            }
        };

        let status = response.status();
        let body = response.text().await.unwrap_or_default();

        if !status.is_success() {
            return Err(classify_http_status(status.as_u16(), body));
        }

        let parsed: CompletionResponse = serde_json::from_str(&body).map_err(|e| {
            LlmError::Parse(format!("failed to parse response: {}, body: {}", e, body))
        })?;

        let choice = parsed
            .choices
            .into_iter()
            .next()
            .ok_or(LlmError::Empty)?;
        let content = choice.message.content.ok_or(LlmError::Empty)?;

        Ok(ChatResponse {
            content,
            usage: parsed.usage,
        })
    }

    /// Execute a request, retrying transient failures with fixed backoff.
    async fn execute_with_retry(
        &self,
        request: &CompletionRequest<'_>,
    ) -> Result<ChatResponse, LlmError> {
        let mut attempt = 0;
        loop {
            match self.execute_request(request).await {
                Ok(response) => {
                    if attempt > 0 {
                        tracing::info!("request succeeded after {} retries", attempt);
                    }
                    return Ok(response);
                }
                Err(error) => {
                    if error.is_transient() && attempt < self.retry_config.max_retries {
                        tracing::warn!(
                            "attempt {} failed, retrying in {:?}: {}",
                            attempt + 1,
                            self.retry_config.backoff,
                            error
                        );
                        tokio::time::sleep(self.retry_config.backoff).await;
                        attempt += 1;
                    } else {
                        return Err(error);
                    }
                }
            }
        }
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn complete(&self, messages: &[ChatMessage]) -> Result<ChatResponse, LlmError> {
        let request = CompletionRequest {
            model: &self.model,
            messages,
            response_format: ResponseFormat {
                format_type: "json_object",
            },
        };

        tracing::debug!(model = %self.model, messages = messages.len(), "sending completion request");

        let response = self.execute_with_retry(&request).await?;
        if let Some(usage) = &response.usage {
            tracing::debug!(
                prompt_tokens = usage.prompt_tokens,
                completion_tokens = usage.completion_tokens,
                "completion usage"
            );
        }
        Ok(response)
    }
}

/// Chat-completions request format.
#[derive(Debug, Serialize)]
struct CompletionRequest<'a> {
    model: &'a str,
    messages: &'a [ChatMessage],
    response_format: ResponseFormat,
}

/// Constrains the reply to a single JSON object.
#[derive(Debug, Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    format_type: &'static str,
}

/// Chat-completions response format.
#[derive(Debug, Deserialize)]
struct CompletionResponse {
    choices: Vec<CompletionChoice>,
    #[serde(default)]
    usage: Option<TokenUsage>,
}

#[derive(Debug, Deserialize)]
struct CompletionChoice {
    message: CompletionMessage,
}

#[derive(Debug, Deserialize)]
struct CompletionMessage {
    content: Option<String>,
}
