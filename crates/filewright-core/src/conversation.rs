//! Conversation — the append-only message history owned by the agent loop.
//!
//! Messages are never edited once appended. Tool outcome messages are checked
//! against the assistant message right before them: every request answered
//! exactly once, in request order.

use crate::error::ConversationError;
use crate::types::{ContentBlock, Message, Role};

/// Ordered, append-only list of messages.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Create an empty conversation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a human text message.
    pub fn push_human_text(&mut self, text: impl Into<String>) {
        self.messages.push(Message::human_text(text));
    }

    /// Append an assistant message verbatim.
    pub fn push_assistant(&mut self, message: Message) -> Result<(), ConversationError> {
        if !self.messages.iter().any(|m| m.role == Role::Human) {
            return Err(ConversationError::AssistantBeforeHuman);
        }
        if message.role != Role::Assistant {
            return Err(ConversationError::NotAssistant {
                actual: message.role,
            });
        }
        self.messages.push(message);
        Ok(())
    }

    /// Append a human-role message answering the last assistant message's tool requests.
    pub fn push_tool_outcomes(&mut self, outcomes: Vec<ContentBlock>) -> Result<(), ConversationError> {
        let last = self
            .messages
            .last()
            .filter(|m| m.role == Role::Assistant)
            .ok_or(ConversationError::NoPendingRequests)?;

        let request_ids: Vec<&str> = last.tool_requests().map(|r| r.id).collect();
        if request_ids.is_empty() {
            return Err(ConversationError::NoPendingRequests);
        }
        if request_ids.len() != outcomes.len() {
            return Err(ConversationError::OutcomeCountMismatch {
                expected: request_ids.len(),
                actual: outcomes.len(),
            });
        }

        for (index, (expected, block)) in request_ids.iter().zip(&outcomes).enumerate() {
            match block {
                ContentBlock::ToolOutcome { request_id, .. } if request_id == expected => {}
                ContentBlock::ToolOutcome { request_id, .. } => {
                    return Err(ConversationError::OutcomeOrderMismatch {
                        index,
                        expected: expected.to_string(),
                        actual: request_id.clone(),
                    });
                }
                _ => return Err(ConversationError::NotAnOutcome { index }),
            }
        }

        self.messages.push(Message::tool_outcomes(outcomes));
        Ok(())
    }

    /// All messages, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// The most recent message.
    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
