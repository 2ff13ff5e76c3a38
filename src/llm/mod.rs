//! LLM client module for interacting with the chat-completions service.
//!
//! This module provides a trait-based abstraction over the model service,
//! with an OpenAI-compatible client as the primary implementation. The
//! assistant's protocol is carried entirely in message text (a single JSON
//! object per reply), so no tool-call plumbing is needed here.

mod error;
mod openai;

pub use error::{LlmError, RetryConfig};
pub use openai::OpenAiClient;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Role in a chat conversation.
///
/// `Developer` is the role observations are fed back under, matching the
/// wire format the system prompt's worked example was written for.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
    Developer,
}

/// A message in a chat conversation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        ChatMessage {
            role,
            content: content.into(),
        }
    }
}

/// Response from a chat completion.
#[derive(Debug, Clone)]
pub struct ChatResponse {
    /// Raw text of the model's reply.
    pub content: String,
    pub usage: Option<TokenUsage>,
}

/// Token usage information (if provided by the service).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

/// Trait for LLM clients.
///
/// The call is synchronous from the loop's perspective: the loop suspends
/// until a reply or an error arrives.
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// Send the full conversation and return the model's next reply,
    /// requested in JSON-object format.
    async fn complete(&self, messages: &[ChatMessage]) -> Result<ChatResponse, LlmError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roles_serialize_lowercase() {
        assert_eq!(serde_json::to_string(&Role::System).unwrap(), "\"system\"");
        assert_eq!(
            serde_json::to_string(&Role::Developer).unwrap(),
            "\"developer\""
        );
    }

    #[test]
    fn chat_message_serializes_role_and_content() {
        let msg = ChatMessage::new(Role::User, "hello");
        let raw = serde_json::to_string(&msg).unwrap();
        assert_eq!(raw, r#"{"role":"user","content":"hello"}"#);
    }
}
