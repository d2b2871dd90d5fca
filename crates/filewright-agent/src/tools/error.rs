//! Tool failure taxonomy.
//!
//! Every variant is recoverable: the registry turns it into a `tool_result`
//! block with `is_error = true` and the model decides what to do next.

use thiserror::Error;

/// Why a tool call failed.
#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("File not found: {0}")]
    FileNotFound(String),

    #[error("old_str not found in {path}")]
    PatternNotFound { path: String },

    #[error("old_str matches {count} times in {path}; it must match exactly once, so include more surrounding context")]
    AmbiguousMatch { path: String, count: usize },

    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Tool not found")]
    UnknownTool(String),
}

impl ToolError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        ToolError::Io {
            path: path.into(),
            source,
        }
    }
}
