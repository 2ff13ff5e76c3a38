//! Agent module - the conversational loop at the core of the assistant.
//!
//! One user turn runs as a small state machine:
//! 1. Append the operator's request to the conversation
//! 2. Call the model with the full history, JSON-object reply required
//! 3. Record the reply verbatim, then decode it
//! 4. On `plan`, call the model again; on `action`, dispatch the tool and
//!    feed the observation back; on `output`, return it to the operator

mod agent_loop;
mod conversation;
mod prompt;

pub use agent_loop::{Agent, TurnError};
pub use conversation::Conversation;
pub use prompt::build_system_prompt;
