//! Core types for Filewright — the typed content model exchanged with the LLM.
//!
//! A message is a role plus an ordered list of content blocks. The wire shape
//! is the Anthropic Messages API: blocks are tagged by `type` (`text`,
//! `tool_use`, `tool_result`). Tool results travel under the `user` role by
//! API convention, not because a human wrote them.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// ─────────────────────────────────────────────
// Role
// ─────────────────────────────────────────────

/// Who authored a message.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The human side of the conversation (also carries tool outcomes).
    #[serde(rename = "user")]
    Human,
    /// The model.
    Assistant,
}

// ─────────────────────────────────────────────
// Content blocks
// ─────────────────────────────────────────────

/// One block of message content.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ContentBlock {
    /// Plain text, produced by either role.
    #[serde(rename = "text")]
    Text { text: String },

    /// A request from the assistant to run a tool.
    #[serde(rename = "tool_use")]
    ToolRequest {
        /// Opaque token; the matching outcome must echo it back.
        id: String,
        name: String,
        #[serde(rename = "input", default)]
        arguments: Map<String, Value>,
    },

    /// The answer to one tool request.
    #[serde(rename = "tool_result")]
    ToolOutcome {
        #[serde(rename = "tool_use_id")]
        request_id: String,
        #[serde(rename = "content")]
        payload: String,
        #[serde(default)]
        is_error: bool,
    },
}

impl ContentBlock {
    /// Create a text block.
    pub fn text(text: impl Into<String>) -> Self {
        ContentBlock::Text { text: text.into() }
    }

    /// Create a tool request block.
    pub fn tool_request(
        id: impl Into<String>,
        name: impl Into<String>,
        arguments: Map<String, Value>,
    ) -> Self {
        ContentBlock::ToolRequest {
            id: id.into(),
            name: name.into(),
            arguments,
        }
    }

    /// Create a tool outcome block.
    pub fn tool_outcome(
        request_id: impl Into<String>,
        payload: impl Into<String>,
        is_error: bool,
    ) -> Self {
        ContentBlock::ToolOutcome {
            request_id: request_id.into(),
            payload: payload.into(),
            is_error,
        }
    }

    /// Borrow the request fields if this is a `ToolRequest`.
    pub fn as_tool_request(&self) -> Option<ToolRequestRef<'_>> {
        match self {
            ContentBlock::ToolRequest {
                id,
                name,
                arguments,
            } => Some(ToolRequestRef {
                id,
                name,
                arguments,
            }),
            _ => None,
        }
    }
}

/// Borrowed view of a `ContentBlock::ToolRequest`.
#[derive(Clone, Copy, Debug)]
pub struct ToolRequestRef<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub arguments: &'a Map<String, Value>,
}

// ─────────────────────────────────────────────
// Message
// ─────────────────────────────────────────────

/// A chat message: a role and its ordered content blocks.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: Vec<ContentBlock>,
}

impl Message {
    /// Create a human message holding a single text block.
    pub fn human_text(text: impl Into<String>) -> Self {
        Message {
            role: Role::Human,
            content: vec![ContentBlock::text(text)],
        }
    }

    /// Create a human-role message carrying tool outcomes.
    pub fn tool_outcomes(outcomes: Vec<ContentBlock>) -> Self {
        Message {
            role: Role::Human,
            content: outcomes,
        }
    }

    /// Create an assistant message from blocks.
    pub fn assistant(content: Vec<ContentBlock>) -> Self {
        Message {
            role: Role::Assistant,
            content,
        }
    }

    /// Create an assistant message holding a single text block.
    pub fn assistant_text(text: impl Into<String>) -> Self {
        Message::assistant(vec![ContentBlock::text(text)])
    }

    /// All text blocks, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> {
        self.content.iter().filter_map(|block| match block {
            ContentBlock::Text { text } => Some(text.as_str()),
            _ => None,
        })
    }

    /// All tool requests, in order.
    pub fn tool_requests(&self) -> impl Iterator<Item = ToolRequestRef<'_>> {
        self.content.iter().filter_map(ContentBlock::as_tool_request)
    }

    /// Whether the message contains at least one tool request.
    pub fn has_tool_requests(&self) -> bool {
        self.tool_requests().next().is_some()
    }
}

// ─────────────────────────────────────────────
// Tool specs (for LLM requests)
// ─────────────────────────────────────────────

/// A tool as advertised to the model: name, description and JSON schema.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    #[serde(rename = "input_schema")]
    pub parameter_schema: Value,
}

impl ToolSpec {
    /// Create a new tool spec.
    pub fn new(name: impl Into<String>, description: impl Into<String>, parameter_schema: Value) -> Self {
        ToolSpec {
            name: name.into(),
            description: description.into(),
            parameter_schema,
        }
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
