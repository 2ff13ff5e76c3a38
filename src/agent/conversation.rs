//! Append-only conversation history.
//!
//! The full history is sent to the model on every call, so the model
//! always sees a prefix-consistent, monotonically growing log of the
//! session. Nothing is ever trimmed or rewritten; over a very long
//! session the request payload grows without bound (known limitation).

use crate::llm::{ChatMessage, Role};
use crate::protocol::AgentMessage;

/// Ordered log of every transport entry in the session.
pub struct Conversation {
    messages: Vec<ChatMessage>,
}

impl Conversation {
    /// Start a conversation seeded with the system instructions.
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            messages: vec![ChatMessage::new(Role::System, system_prompt)],
        }
    }

    /// Append an operator request.
    pub fn push_user(&mut self, message: &AgentMessage) {
        self.messages
            .push(ChatMessage::new(Role::User, serialize(message)));
    }

    /// Append the model's reply verbatim, before it is decoded. The raw
    /// text is recorded even when it later turns out to be malformed, so
    /// the model has its own prior replies in context.
    pub fn push_assistant_raw(&mut self, raw: impl Into<String>) {
        self.messages.push(ChatMessage::new(Role::Assistant, raw));
    }

    /// Append a tool observation for the model's next call.
    pub fn push_observation(&mut self, message: &AgentMessage) {
        self.messages
            .push(ChatMessage::new(Role::Developer, serialize(message)));
    }

    /// The full history, in append order.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

fn serialize(message: &AgentMessage) -> String {
    // AgentMessage contains only strings and JSON values; serialization
    // cannot fail for well-formed input.
    serde_json::to_string(message).unwrap_or_else(|_| "{}".to_string())
}
