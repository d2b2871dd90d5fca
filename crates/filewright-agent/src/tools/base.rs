//! Tool trait — the interface every agent tool implements.

use async_trait::async_trait;
use serde_json::{Map, Value};

use filewright_core::types::ToolSpec;

use super::error::ToolError;

// ─────────────────────────────────────────────
// Tool trait
// ─────────────────────────────────────────────

/// Every agent tool implements this trait.
///
/// The agent loop discovers tools via `name()`, sends their schemas to the LLM
/// via `to_spec()`, and dispatches calls via `execute()`.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Unique name used by the LLM to call this tool (e.g. `"read_file"`).
    fn name(&self) -> &str;

    /// Human-readable description shown to the LLM.
    fn description(&self) -> &str;

    /// JSON Schema describing the parameters.
    ///
    /// Must be `{"type": "object", "properties": {...}, "required": [...]}`.
    fn parameters(&self) -> Value;

    /// Execute the tool with the model-supplied arguments.
    ///
    /// Returns the payload the LLM reads. Failures are returned as
    /// `ToolError`; the registry converts them into error outcomes.
    async fn execute(&self, params: &Map<String, Value>) -> Result<String, ToolError>;

    /// Build the `ToolSpec` sent to the LLM.
    fn to_spec(&self) -> ToolSpec {
        ToolSpec::new(self.name(), self.description(), self.parameters())
    }
}

// ─────────────────────────────────────────────
// ToolOutput
// ─────────────────────────────────────────────

/// What a tool call produced: a payload and whether it reports a failure.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ToolOutput {
    pub payload: String,
    pub is_error: bool,
}

impl ToolOutput {
    pub fn ok(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            is_error: false,
        }
    }

    pub fn error(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
            is_error: true,
        }
    }
}

impl From<Result<String, ToolError>> for ToolOutput {
    fn from(result: Result<String, ToolError>) -> Self {
        match result {
            Ok(payload) => ToolOutput::ok(payload),
            Err(e) => ToolOutput::error(e.to_string()),
        }
    }
}

// ─────────────────────────────────────────────
// Param helpers
// ─────────────────────────────────────────────

/// Extract a required `String` param.
pub fn require_string(params: &Map<String, Value>, key: &str) -> Result<String, ToolError> {
    match params.get(key) {
        Some(Value::String(s)) => Ok(s.clone()),
        Some(other) => Err(ToolError::InvalidArguments(format!(
            "parameter '{key}' must be a string, got {other}"
        ))),
        None => Err(ToolError::InvalidArguments(format!(
            "missing required parameter '{key}'"
        ))),
    }
}

/// Extract an optional `String` param. `null` counts as absent.
pub fn optional_string(params: &Map<String, Value>, key: &str) -> Result<Option<String>, ToolError> {
    match params.get(key) {
        None | Some(Value::Null) => Ok(None),
        Some(_) => require_string(params, key).map(Some),
    }
}
