//! Filewright Core — content model, conversation, config, and shared errors.
//!
//! This crate contains:
//! - **types**: messages, content blocks, tool specs (Anthropic wire format)
//! - **conversation**: the append-only history and its invariants
//! - **config**: JSON config + env overrides
//! - **error**: provider and conversation error types

pub mod config;
pub mod conversation;
pub mod error;
pub mod types;
pub mod utils;

pub use conversation::Conversation;
pub use error::{ConversationError, ProviderError};
pub use types::{ContentBlock, Message, Role, ToolRequestRef, ToolSpec};
