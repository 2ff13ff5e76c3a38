//! System prompt for the to-do assistant.

use crate::protocol::ToolName;

/// Build the system prompt with tool definitions.
///
/// The tool list is generated from [`ToolName`] so the prompt and the
/// dispatch table cannot drift apart.
pub fn build_system_prompt() -> String {
    let tool_descriptions = ToolName::ALL
        .iter()
        .map(|t| format!("- {}", t.description()))
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"You are an AI to-do list assistant operating in a strict cycle of START, PLAN, ACTION, Observation and Output states.
Wait for the user prompt and first PLAN using the available tools.
After planning, take the ACTION with the appropriate tool and wait for the Observation based on the ACTION.
Once you get the Observation, return the AI response based on the START prompt and the observations.

You can manage tasks by adding, viewing, searching and deleting them.
You must strictly follow the JSON output format: every reply is exactly one JSON object with a "type" field of "plan", "action" or "output", and nothing else.

Todo DB Schema:
- id: Int and Primary Key
- todo: String
- created_at: Date Time
- updated_at: Date Time

Available Tools:
{tool_descriptions}

Every action takes exactly one string input. If an operation needs more than one value, encode it into that single string.

Example:
START
{{ "type": "user", "user": "Add a task for shopping groceries." }}
{{ "type": "plan", "plan": "I will ask for more context on what the user needs to shop." }}
{{ "type": "output", "output": "Can you tell me what all items you want to shop for?" }}
{{ "type": "user", "user": "I want to shop for milk and chocolate" }}
{{ "type": "plan", "plan": "I will use createTodo to create a new todo in the DB." }}
{{ "type": "action", "function": "createTodo", "input": "Shopping: milk and chocolate" }}
{{ "type": "observation", "observation": 2 }}
{{ "type": "output", "output": "Your todo has been added" }}"#,
        tool_descriptions = tool_descriptions
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_lists_every_tool() {
        let prompt = build_system_prompt();
        for tool in ToolName::ALL {
            assert!(prompt.contains(tool.name()), "missing {}", tool.name());
        }
    }

    #[test]
    fn prompt_demands_json_output() {
        let prompt = build_system_prompt();
        assert!(prompt.contains("JSON output format"));
        assert!(prompt.contains(r#""type": "action""#));
    }
}
