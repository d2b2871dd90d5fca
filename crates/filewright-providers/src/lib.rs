//! LLM provider layer for Filewright.
//!
//! # Architecture
//!
//! - [`traits::LlmProvider`] — the inference boundary the agent loop talks to
//! - [`anthropic::AnthropicProvider`] — Anthropic Messages API client over `reqwest`

pub mod anthropic;
pub mod traits;

pub use anthropic::AnthropicProvider;
pub use traits::{LlmProvider, LlmRequestConfig};
