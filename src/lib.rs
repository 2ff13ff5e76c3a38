//! # todo-agent
//!
//! An LLM-driven to-do list assistant for the terminal.
//!
//! This library provides:
//! - A rusqlite-backed task store with four operations
//! - A fixed JSON protocol between the driving loop and the model
//! - An agent loop that dispatches the model's requested tool calls
//!
//! ## Architecture
//!
//! The assistant follows the "tools in a loop" pattern:
//! 1. Read one line of operator input from the terminal
//! 2. Send the full conversation to the chat-completions endpoint,
//!    requesting a JSON-object reply
//! 3. Decode the reply as a protocol message, execute any requested tool
//! 4. Feed the observation back to the model, repeat until it emits an
//!    `output` message for the operator
//!
//! ## Example
//!
//! ```rust,ignore
//! use todo_agent::{agent::Agent, config::Config, store::TaskStore};
//!
//! let config = Config::from_env()?;
//! let store = TaskStore::open(&config.db_path)?;
//! let mut agent = Agent::new(&config, store);
//! let reply = agent.run_turn("Add a task for milk").await?;
//! ```

pub mod agent;
pub mod config;
pub mod llm;
pub mod protocol;
pub mod store;
pub mod tools;

pub use config::Config;
