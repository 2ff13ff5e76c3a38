//! Core agent loop implementation.

use std::sync::Arc;

use serde_json::json;
use thiserror::Error;

use crate::config::Config;
use crate::llm::{LlmClient, LlmError, OpenAiClient};
use crate::protocol::{decode_reply, AgentMessage, DecodeError};
use crate::store::TaskStore;
use crate::tools::{ToolError, ToolRegistry};

use super::conversation::Conversation;
use super::prompt::build_system_prompt;

/// Why a user turn was abandoned.
///
/// None of these are process-fatal: the caller reports the error to the
/// operator and re-prompts. The conversation keeps everything appended
/// before the failure, so the model sees its own prior replies next turn.
#[derive(Debug, Error)]
pub enum TurnError {
    #[error("protocol error: {0}")]
    Protocol(String),

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("model call failed: {0}")]
    Transport(#[from] LlmError),

    #[error("tool failure: {0}")]
    Tool(#[from] ToolError),

    #[error("no output after {0} model calls, abandoning turn")]
    StepLimit(usize),
}

impl From<DecodeError> for TurnError {
    fn from(err: DecodeError) -> Self {
        match err {
            DecodeError::UnknownTool(name) => TurnError::UnknownTool(name),
            other => TurnError::Protocol(other.to_string()),
        }
    }
}

/// The interactive to-do assistant.
pub struct Agent {
    llm: Arc<dyn LlmClient>,
    tools: ToolRegistry,
    conversation: Conversation,
    max_steps: usize,
}

impl Agent {
    /// Create a new agent with the given configuration and task store.
    pub fn new(config: &Config, store: TaskStore) -> Self {
        Self::with_client(Arc::new(OpenAiClient::new(config)), store, config.max_steps)
    }

    /// Create an agent with a custom LLM client (useful for testing).
    pub fn with_client(llm: Arc<dyn LlmClient>, store: TaskStore, max_steps: usize) -> Self {
        Self {
            llm,
            tools: ToolRegistry::new(store),
            conversation: Conversation::new(build_system_prompt()),
            max_steps,
        }
    }

    /// The session history accumulated so far.
    pub fn conversation(&self) -> &Conversation {
        &self.conversation
    }

    /// Run one user turn: append the request, call the model until it
    /// produces an `output`, dispatching any requested tools along the way.
    ///
    /// Returns the user-visible output text. Any error abandons the turn;
    /// the loop is re-usable for the next turn afterwards.
    pub async fn run_turn(&mut self, input: &str) -> Result<String, TurnError> {
        self.conversation.push_user(&AgentMessage::user(input));

        for step in 0..self.max_steps {
            tracing::debug!(step = step + 1, "calling model");
            let response = self.llm.complete(self.conversation.messages()).await?;

            // Record the reply verbatim before inspecting it.
            self.conversation.push_assistant_raw(response.content.clone());

            match decode_reply(&response.content)? {
                AgentMessage::Plan { plan } => {
                    tracing::debug!(%plan, "model planned");
                }
                AgentMessage::Output { output } => {
                    return Ok(output);
                }
                AgentMessage::Action { function, input } => {
                    let observation = match self.tools.dispatch(function, &input) {
                        Ok(value) => AgentMessage::observation(value),
                        Err(err @ ToolError::Encode(_)) => return Err(err.into()),
                        Err(err) => {
                            // Recoverable: feed the error back so the model
                            // can adjust on its next reply.
                            tracing::warn!(tool = function.name(), error = %err, "tool failed");
                            AgentMessage::observation(json!(format!("Error: {}", err)))
                        }
                    };
                    self.conversation.push_observation(&observation);
                }
                AgentMessage::User { .. } | AgentMessage::Observation { .. } => {
                    return Err(TurnError::Protocol(
                        "model emitted a message type only the loop may produce".to_string(),
                    ));
                }
            }
        }

        Err(TurnError::StepLimit(self.max_steps))
    }
}
