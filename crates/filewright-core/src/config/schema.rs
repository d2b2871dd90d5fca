//! Configuration schema.
//!
//! Hierarchy: `Config` → `AgentConfig`, `ProviderConfig`.
//!
//! JSON on disk uses **camelCase** keys; Rust uses snake_case.

use serde::{Deserialize, Serialize};

/// Model used when nothing else is configured.
pub const DEFAULT_MODEL: &str = "claude-opus-4-5-20251101";

/// Consecutive tool-use rounds allowed before control returns to the human.
pub const DEFAULT_MAX_CHAIN_ROUNDS: u32 = 20;

// ─────────────────────────────────────────────
// Root Config
// ─────────────────────────────────────────────

/// Root configuration — loaded from `~/.filewright/config.json` + env vars.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub agent: AgentConfig,
    pub provider: ProviderConfig,
}

// ─────────────────────────────────────────────
// Agent
// ─────────────────────────────────────────────

/// Agent loop settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AgentConfig {
    /// Directory that relative tool paths resolve against.
    pub workspace: String,
    /// Model identifier sent with every inference call.
    pub model: String,
    /// Maximum output tokens per inference call.
    pub max_tokens: u32,
    /// Consecutive tool-use rounds allowed before control returns to the human.
    pub max_chain_rounds: u32,
    /// Optional system prompt.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub system_prompt: Option<String>,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            workspace: ".".to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: 1024,
            max_chain_rounds: DEFAULT_MAX_CHAIN_ROUNDS,
            system_prompt: None,
        }
    }
}

// ─────────────────────────────────────────────
// Provider
// ─────────────────────────────────────────────

/// Anthropic API connection settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProviderConfig {
    /// API key sent as `x-api-key`.
    pub api_key: String,
    /// Custom API base URL (defaults to `https://api.anthropic.com`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub api_base: Option<String>,
    /// Retries for rate-limited or overloaded responses.
    pub max_retries: u32,
    /// Per-request timeout.
    pub timeout_secs: u64,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            api_base: None,
            max_retries: 2,
            timeout_secs: 120,
        }
    }
}

impl ProviderConfig {
    /// Whether an API key has been configured.
    pub fn is_configured(&self) -> bool {
        !self.api_key.is_empty()
    }
}
