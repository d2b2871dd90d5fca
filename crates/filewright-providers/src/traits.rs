//! LLM Provider trait — the inference boundary.
//!
//! The agent loop hands over the whole conversation plus the tool catalog and
//! gets back exactly one assistant message. Retries are the provider's business.

use async_trait::async_trait;
use filewright_core::error::ProviderError;
use filewright_core::types::{Message, ToolSpec};

/// Configuration passed to each LLM call.
#[derive(Clone, Debug)]
pub struct LlmRequestConfig {
    /// Maximum tokens to generate.
    pub max_tokens: u32,
    /// Optional system prompt.
    pub system: Option<String>,
}

impl Default for LlmRequestConfig {
    fn default() -> Self {
        Self {
            max_tokens: 1024,
            system: None,
        }
    }
}

/// Trait that all LLM providers must implement.
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Send the conversation and tool catalog; receive one assistant message.
    ///
    /// # Arguments
    /// * `messages` — Full conversation history, oldest first.
    /// * `tools`    — Tool specs the model may request, in registry order.
    /// * `model`    — Model identifier (e.g. `"claude-opus-4-5-20251101"`).
    /// * `config`   — max_tokens, system prompt.
    ///
    /// # Errors
    /// `ProviderError::ProtocolViolation` when the response is not a
    /// well-formed assistant message; other variants for transport/API failures.
    async fn chat(
        &self,
        messages: &[Message],
        tools: &[ToolSpec],
        model: &str,
        config: &LlmRequestConfig,
    ) -> Result<Message, ProviderError>;

    /// The default model for this provider instance.
    fn default_model(&self) -> &str;

    /// Display name for logging.
    fn display_name(&self) -> &str;
}
