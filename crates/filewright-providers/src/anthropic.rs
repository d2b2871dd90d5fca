//! Anthropic Messages API provider.
//!
//! Talks directly to `POST {api_base}/v1/messages` via `reqwest`:
//! - `x-api-key` header authentication (not Bearer)
//! - `anthropic-version` header
//! - System prompt as a top-level field
//! - Native `tool_use` / `tool_result` content blocks, which map 1:1 onto
//!   [`ContentBlock`]
//!
//! Rate-limit (429) and server-side (5xx) failures are retried with
//! exponential backoff; everything else is returned to the caller.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, warn};

use filewright_core::config::ProviderConfig;
use filewright_core::error::ProviderError;
use filewright_core::types::{ContentBlock, Message, Role, ToolSpec};

use crate::traits::{LlmProvider, LlmRequestConfig};

const ANTHROPIC_VERSION: &str = "2023-06-01";
const DEFAULT_API_BASE: &str = "https://api.anthropic.com";
const DEFAULT_RETRY_BACKOFF: Duration = Duration::from_millis(500);

// ─────────────────────────────────────────────
// Wire types
// ─────────────────────────────────────────────

/// Request body for `/v1/messages`.
#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    messages: &'a [Message],
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<&'a [ToolSpec]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
}

/// Response body from `/v1/messages`.
#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    id: Option<String>,
    role: Role,
    content: Vec<ContentBlock>,
    #[serde(default)]
    stop_reason: Option<String>,
    #[serde(default)]
    usage: Option<Usage>,
}

/// Token usage statistics.
#[derive(Debug, Deserialize)]
struct Usage {
    input_tokens: u32,
    output_tokens: u32,
}

// ─────────────────────────────────────────────
// AnthropicProvider
// ─────────────────────────────────────────────

/// An [`LlmProvider`] backed by the Anthropic Messages API.
pub struct AnthropicProvider {
    /// HTTP client (shared, connection-pooled).
    client: reqwest::Client,
    /// API base URL without trailing slash.
    api_base: String,
    api_key: String,
    default_model: String,
    max_retries: u32,
    retry_backoff: Duration,
}

impl std::fmt::Debug for AnthropicProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnthropicProvider")
            .field("api_base", &self.api_base)
            .field("default_model", &self.default_model)
            .field("max_retries", &self.max_retries)
            .finish()
    }
}

impl AnthropicProvider {
    /// Create a provider from the user's config.
    ///
    /// Fails with `NotConfigured` when no API key is set.
    pub fn new(config: &ProviderConfig, model: &str) -> Result<Self, ProviderError> {
        if !config.is_configured() {
            return Err(ProviderError::NotConfigured(
                "no Anthropic API key; set ANTHROPIC_API_KEY or provider.apiKey in the config"
                    .into(),
            ));
        }

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| ProviderError::Network(format!("failed to build HTTP client: {e}")))?;

        let api_base = config
            .api_base
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE)
            .trim_end_matches('/')
            .to_string();

        Ok(AnthropicProvider {
            client,
            api_base,
            api_key: config.api_key.clone(),
            default_model: model.to_string(),
            max_retries: config.max_retries,
            retry_backoff: DEFAULT_RETRY_BACKOFF,
        })
    }

    /// Override the base delay between retries (doubles on each attempt).
    pub fn with_retry_backoff(mut self, backoff: Duration) -> Self {
        self.retry_backoff = backoff;
        self
    }

    /// Full messages endpoint URL.
    fn messages_url(&self) -> String {
        format!("{}/v1/messages", self.api_base)
    }

    /// One HTTP round trip, no retries.
    async fn send_once(&self, body: &MessagesRequest<'_>) -> Result<Message, ProviderError> {
        let response = self
            .client
            .post(self.messages_url())
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(body)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| ProviderError::Network(format!("failed to read response body: {e}")))?;

        if !status.is_success() {
            return Err(ProviderError::Api {
                status: status.as_u16(),
                body: text,
            });
        }

        parse_response(&text)
    }
}

/// Turn a 2xx body into an assistant message, or flag it as a protocol violation.
fn parse_response(body: &str) -> Result<Message, ProviderError> {
    let resp: MessagesResponse = serde_json::from_str(body)
        .map_err(|e| ProviderError::ProtocolViolation(format!("malformed response: {e}")))?;

    if resp.role != Role::Assistant {
        return Err(ProviderError::ProtocolViolation(format!(
            "expected an assistant message, got role {:?}",
            resp.role
        )));
    }
    if let Some(block) = resp
        .content
        .iter()
        .find(|b| matches!(b, ContentBlock::ToolOutcome { .. }))
    {
        return Err(ProviderError::ProtocolViolation(format!(
            "assistant message contains a tool_result block: {block:?}"
        )));
    }

    if resp.stop_reason.as_deref() == Some("max_tokens") {
        warn!("response truncated at max_tokens");
    }
    debug!(
        id = resp.id.as_deref().unwrap_or("?"),
        blocks = resp.content.len(),
        stop_reason = resp.stop_reason.as_deref().unwrap_or("?"),
        input_tokens = resp.usage.as_ref().map_or(0, |u| u.input_tokens),
        output_tokens = resp.usage.as_ref().map_or(0, |u| u.output_tokens),
        "LLM response received"
    );

    Ok(Message::assistant(resp.content))
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    async fn chat(
        &self,
        messages: &[Message],
        tools: &[ToolSpec],
        model: &str,
        config: &LlmRequestConfig,
    ) -> Result<Message, ProviderError> {
        let body = MessagesRequest {
            model,
            max_tokens: config.max_tokens,
            messages,
            tools: (!tools.is_empty()).then_some(tools),
            system: config.system.as_deref(),
        };

        debug!(
            provider = "anthropic",
            model = %model,
            messages = messages.len(),
            tools = tools.len(),
            "Calling LLM"
        );

        let mut attempt = 0;
        loop {
            match self.send_once(&body).await {
                Ok(message) => return Ok(message),
                Err(e) if e.is_retryable() && attempt < self.max_retries => {
                    let delay = self.retry_backoff * 2u32.pow(attempt);
                    warn!(
                        provider = "anthropic",
                        attempt = attempt + 1,
                        delay_ms = delay.as_millis() as u64,
                        error = %e,
                        "retrying LLM call"
                    );
                    tokio::time::sleep(delay).await;
                    attempt += 1;
                }
                Err(e) => {
                    error!(provider = "anthropic", error = %e, "LLM call failed");
                    return Err(e);
                }
            }
        }
    }

    fn default_model(&self) -> &str {
        &self.default_model
    }

    fn display_name(&self) -> &str {
        "Anthropic"
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
