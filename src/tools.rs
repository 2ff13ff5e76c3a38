//! Tool dispatch: maps a decoded [`ToolName`] onto the task store.
//!
//! Every tool takes exactly one string input (the protocol the model is
//! prompted with supports no other shape) and returns a JSON value that is
//! fed back into the conversation as an observation.

use serde_json::{json, Value};
use thiserror::Error;

use crate::protocol::ToolName;
use crate::store::{StoreError, TaskStore};

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("invalid input for {tool}: {reason}")]
    BadInput { tool: &'static str, reason: String },

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to encode tool result: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Executes tool calls against the task store.
pub struct ToolRegistry {
    store: TaskStore,
}

impl ToolRegistry {
    pub fn new(store: TaskStore) -> Self {
        Self { store }
    }

    /// Invoke the named tool with its single string input.
    ///
    /// Errors are returned to the caller, which records them as an error
    /// observation so the model can react on its next reply.
    pub fn dispatch(&self, tool: ToolName, input: &str) -> Result<Value, ToolError> {
        tracing::debug!(tool = tool.name(), input, "dispatching tool");
        match tool {
            ToolName::GetAllTodos => Ok(serde_json::to_value(self.store.list_all()?)?),
            ToolName::CreateTodo => Ok(json!(self.store.create(input)?)),
            ToolName::SearchTodo => Ok(serde_json::to_value(self.store.search(input)?)?),
            ToolName::DeleteTodoById => {
                let id: i64 = input.trim().parse().map_err(|_| ToolError::BadInput {
                    tool: tool.name(),
                    reason: format!("expected a numeric id, got {:?}", input),
                })?;
                Ok(json!(self.store.delete_by_id(id)?))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn registry() -> ToolRegistry {
        ToolRegistry::new(TaskStore::open_in_memory().unwrap())
    }

    #[test]
    fn create_returns_the_new_id_as_number() {
        let registry = registry();
        let result = registry.dispatch(ToolName::CreateTodo, "milk").unwrap();
        assert_eq!(result, json!(1));
    }

    #[test]
    fn get_all_ignores_input_and_returns_array() {
        let registry = registry();
        registry.dispatch(ToolName::CreateTodo, "milk").unwrap();
        let result = registry
            .dispatch(ToolName::GetAllTodos, "ignored")
            .unwrap();
        let tasks = result.as_array().unwrap();
        assert_eq!(tasks.len(), 1);
        assert_eq!(tasks[0]["todo"], "milk");
    }

    #[test]
    fn search_returns_matching_tasks() {
        let registry = registry();
        registry.dispatch(ToolName::CreateTodo, "Buy Milk").unwrap();
        registry
            .dispatch(ToolName::CreateTodo, "call dentist")
            .unwrap();
        let result = registry.dispatch(ToolName::SearchTodo, "MILK").unwrap();
        assert_eq!(result.as_array().unwrap().len(), 1);
    }

    #[test]
    fn delete_accepts_id_with_surrounding_whitespace() {
        let registry = registry();
        registry.dispatch(ToolName::CreateTodo, "milk").unwrap();
        let result = registry.dispatch(ToolName::DeleteTodoById, " 1 ").unwrap();
        assert!(result.as_str().unwrap().contains("1"));
        let remaining = registry.dispatch(ToolName::GetAllTodos, "").unwrap();
        assert!(remaining.as_array().unwrap().is_empty());
    }

    #[test]
    fn delete_with_non_numeric_id_is_bad_input() {
        let registry = registry();
        let err = registry
            .dispatch(ToolName::DeleteTodoById, "the milk one")
            .unwrap_err();
        assert!(matches!(err, ToolError::BadInput { .. }));
        assert!(err.to_string().contains("deleteTodoById"));
    }
}
