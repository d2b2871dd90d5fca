//! Filewright Agent — the conversation loop and its tools.
//!
//! This crate contains:
//! - **tools**: Tool trait, registry, and the filesystem tools (read, list, edit)
//! - **agent_loop**: the AwaitingHuman ↔ Running state machine

pub mod agent_loop;
pub mod tools;

pub use agent_loop::{AgentError, AgentLoop, AgentSettings, HumanChannel, LoopState, TurnSummary};
pub use tools::{default_registry, Tool, ToolError, ToolOutput, ToolRegistry};
