//! The JSON protocol spoken between the loop and the model.
//!
//! Every model reply must be a single JSON object with a `type` tag drawn
//! from {plan, action, output} (the loop itself produces `user` and
//! `observation` entries). Replies are decoded here, at the boundary, so
//! that an unknown tool name is rejected before anything is dispatched.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// The four task-store operations the model may request, keyed by the
/// names advertised in the system prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ToolName {
    #[serde(rename = "getAllTodos")]
    GetAllTodos,
    #[serde(rename = "createTodo")]
    CreateTodo,
    #[serde(rename = "deleteTodoById")]
    DeleteTodoById,
    #[serde(rename = "searchTodo")]
    SearchTodo,
}

impl ToolName {
    pub const ALL: [ToolName; 4] = [
        ToolName::GetAllTodos,
        ToolName::CreateTodo,
        ToolName::DeleteTodoById,
        ToolName::SearchTodo,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            ToolName::GetAllTodos => "getAllTodos",
            ToolName::CreateTodo => "createTodo",
            ToolName::DeleteTodoById => "deleteTodoById",
            ToolName::SearchTodo => "searchTodo",
        }
    }

    /// Signature and description line for the system prompt.
    pub fn description(&self) -> &'static str {
        match self {
            ToolName::GetAllTodos => "getAllTodos(): Returns all the todos from the database",
            ToolName::CreateTodo => {
                "createTodo(todo: string): Creates a new todo in the database and returns its id"
            }
            ToolName::DeleteTodoById => {
                "deleteTodoById(id: string): Deletes the todo with the given id from the database"
            }
            ToolName::SearchTodo => {
                "searchTodo(query: string): Returns all todos whose text contains the query (case-insensitive)"
            }
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.name() == name)
    }
}

/// One turn of the protocol.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum AgentMessage {
    /// Free-text request from the operator.
    User { user: String },
    /// The model's stated intention. Advisory only, never executed.
    Plan { plan: String },
    /// A request to invoke one named tool with one string input.
    Action {
        function: ToolName,
        #[serde(default)]
        input: String,
    },
    /// Result (or error description) of a tool invocation.
    Observation { observation: Value },
    /// The final, user-visible response for this turn.
    Output { output: String },
}

impl AgentMessage {
    pub fn user(text: impl Into<String>) -> Self {
        AgentMessage::User { user: text.into() }
    }

    pub fn observation(value: Value) -> Self {
        AgentMessage::Observation { observation: value }
    }
}

/// Why a model reply could not be decoded.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("model reply is not a JSON object: {0}")]
    Malformed(String),

    #[error("model reply has no recognized type tag: {0}")]
    UnknownTag(String),

    #[error("model requested unknown tool: {0}")]
    UnknownTool(String),
}

/// Decode one raw model reply into a protocol message.
///
/// The tool name is checked against [`ToolName`] here so an action naming
/// a nonexistent function never reaches dispatch.
pub fn decode_reply(raw: &str) -> Result<AgentMessage, DecodeError> {
    let value: Value =
        serde_json::from_str(raw).map_err(|e| DecodeError::Malformed(e.to_string()))?;

    let tag = value
        .get("type")
        .and_then(Value::as_str)
        .ok_or_else(|| DecodeError::UnknownTag("<missing>".to_string()))?;

    match tag {
        "user" | "plan" | "action" | "observation" | "output" => {}
        other => return Err(DecodeError::UnknownTag(other.to_string())),
    }

    if tag == "action" {
        let function = value
            .get("function")
            .and_then(Value::as_str)
            .ok_or_else(|| DecodeError::Malformed("action without function field".to_string()))?;
        if ToolName::from_name(function).is_none() {
            return Err(DecodeError::UnknownTool(function.to_string()));
        }
    }

    serde_json::from_value(value).map_err(|e| DecodeError::Malformed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn action_reply_decodes() {
        let msg =
            decode_reply(r#"{"type":"action","function":"createTodo","input":"milk"}"#).unwrap();
        match msg {
            AgentMessage::Action { function, input } => {
                assert_eq!(function, ToolName::CreateTodo);
                assert_eq!(input, "milk");
            }
            other => panic!("expected action, got {:?}", other),
        }
    }

    #[test]
    fn action_without_input_defaults_to_empty() {
        let msg = decode_reply(r#"{"type":"action","function":"getAllTodos"}"#).unwrap();
        match msg {
            AgentMessage::Action { function, input } => {
                assert_eq!(function, ToolName::GetAllTodos);
                assert!(input.is_empty());
            }
            other => panic!("expected action, got {:?}", other),
        }
    }

    #[test]
    fn output_reply_decodes() {
        let msg = decode_reply(r#"{"type":"output","output":"Added."}"#).unwrap();
        assert!(matches!(msg, AgentMessage::Output { output } if output == "Added."));
    }

    #[test]
    fn plan_reply_decodes() {
        let msg = decode_reply(r#"{"type":"plan","plan":"I will list the todos."}"#).unwrap();
        assert!(matches!(msg, AgentMessage::Plan { .. }));
    }

    #[test]
    fn non_json_reply_is_malformed() {
        assert!(matches!(
            decode_reply("Sure, I can help with that!"),
            Err(DecodeError::Malformed(_))
        ));
    }

    #[test]
    fn unrecognized_tag_is_rejected() {
        assert!(matches!(
            decode_reply(r#"{"type":"thought","thought":"hmm"}"#),
            Err(DecodeError::UnknownTag(t)) if t == "thought"
        ));
    }

    #[test]
    fn missing_tag_is_rejected() {
        assert!(matches!(
            decode_reply(r#"{"output":"hi"}"#),
            Err(DecodeError::UnknownTag(_))
        ));
    }

    #[test]
    fn misspelled_tool_is_unknown_tool() {
        assert!(matches!(
            decode_reply(r#"{"type":"action","function":"deleteTodo","input":"3"}"#),
            Err(DecodeError::UnknownTool(name)) if name == "deleteTodo"
        ));
    }

    #[test]
    fn observation_serializes_with_type_tag() {
        let msg = AgentMessage::observation(json!(7));
        let raw = serde_json::to_string(&msg).unwrap();
        assert_eq!(raw, r#"{"type":"observation","observation":7}"#);
    }

    #[test]
    fn user_message_serializes_with_type_tag() {
        let raw = serde_json::to_string(&AgentMessage::user("Add a task for milk")).unwrap();
        assert_eq!(raw, r#"{"type":"user","user":"Add a task for milk"}"#);
    }
}
