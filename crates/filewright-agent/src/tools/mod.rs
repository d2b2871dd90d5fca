//! Tool modules for the Filewright agent.

pub mod base;
pub mod error;
pub mod filesystem;
pub mod registry;

use std::path::PathBuf;
use std::sync::Arc;

pub use base::{optional_string, require_string, Tool, ToolOutput};
pub use error::ToolError;
pub use filesystem::{EditFileTool, ListFilesTool, ReadFileTool};
pub use registry::ToolRegistry;

/// The standard tool set (`read_file`, `list_files`, `edit_file`) rooted at `root`.
pub fn default_registry(root: impl Into<PathBuf>) -> ToolRegistry {
    let root = root.into();
    let mut tools = ToolRegistry::new();
    tools.register(Arc::new(ReadFileTool::new(root.clone())));
    tools.register(Arc::new(ListFilesTool::new(root.clone())));
    tools.register(Arc::new(EditFileTool::new(root)));
    tools
}
