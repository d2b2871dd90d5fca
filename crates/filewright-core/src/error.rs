//! Error types shared across Filewright crates.

use thiserror::Error;

use crate::types::Role;

/// Failures at the inference boundary.
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// The response did not have the shape the API promises.
    #[error("Protocol violation: {0}")]
    ProtocolViolation(String),

    #[error("API request failed with status {status}: {body}")]
    Api { status: u16, body: String },

    #[error("Network error: {0}")]
    Network(String),

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

impl ProviderError {
    /// Whether another attempt might succeed (rate limits, overload, server faults).
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::Api { status, .. } => *status == 429 || *status >= 500,
            ProviderError::Network(_) => true,
            _ => false,
        }
    }
}

/// Violations of the conversation's append-only invariants.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConversationError {
    #[error("an assistant message cannot precede the first human message")]
    AssistantBeforeHuman,

    #[error("push_assistant was given a {actual:?} message")]
    NotAssistant { actual: Role },

    #[error("tool outcomes must follow an assistant message with tool requests")]
    NoPendingRequests,

    #[error("expected {expected} tool outcomes, got {actual}")]
    OutcomeCountMismatch { expected: usize, actual: usize },

    #[error("outcome #{index} answers '{actual}' but request '{expected}' was next")]
    OutcomeOrderMismatch {
        index: usize,
        expected: String,
        actual: String,
    },

    #[error("block #{index} of a tool outcome message is not a tool outcome")]
    NotAnOutcome { index: usize },
}
