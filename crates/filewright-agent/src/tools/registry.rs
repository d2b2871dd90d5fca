//! Tool Registry — the ordered tool catalog plus name → executor dispatch.
//!
//! Registration happens once at startup. The specs are handed to every
//! inference call in registration order.

use std::collections::HashMap;
use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{info, warn};

use filewright_core::types::ToolSpec;

use super::base::{Tool, ToolOutput};
use super::error::ToolError;

// ─────────────────────────────────────────────
// Registry
// ─────────────────────────────────────────────

/// Stores tools in registration order and dispatches calls by name.
#[derive(Default)]
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tool. A tool with the same name is replaced in place,
    /// keeping its original position.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.name().to_string();
        match self.index.get(&name) {
            Some(&pos) => {
                warn!(tool = %name, "replacing registered tool");
                self.tools[pos] = tool;
            }
            None => {
                info!(tool = %name, "registered tool");
                self.index.insert(name, self.tools.len());
                self.tools.push(tool);
            }
        }
    }

    /// Look up a tool by name.
    pub fn get(&self, name: &str) -> Option<&Arc<dyn Tool>> {
        self.index.get(name).map(|&pos| &self.tools[pos])
    }

    /// Check if a tool is registered.
    pub fn has(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Names of all registered tools, in registration order.
    pub fn tool_names(&self) -> Vec<String> {
        self.tools.iter().map(|t| t.name().to_string()).collect()
    }

    /// The LLM-facing specs for all registered tools, in registration order.
    pub fn specs(&self) -> Vec<ToolSpec> {
        self.tools.iter().map(|t| t.to_spec()).collect()
    }

    /// Execute a tool by name.
    ///
    /// Never fails: unknown tools and tool errors come back as error outputs
    /// so the model can see them.
    pub async fn execute(&self, name: &str, params: &Map<String, Value>) -> ToolOutput {
        let Some(tool) = self.get(name) else {
            warn!(tool = name, "tool not found");
            return ToolOutput::error(ToolError::UnknownTool(name.to_string()).to_string());
        };

        let result = tool.execute(params).await;
        if let Err(ref e) = result {
            warn!(tool = name, error = %e, "tool execution failed");
        }
        result.into()
    }

    /// Number of registered tools.
    pub fn len(&self) -> usize {
        self.tools.len()
    }

    /// Whether the registry is empty.
    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}
