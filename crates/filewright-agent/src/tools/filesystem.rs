//! Filesystem tools — read, list, and search-and-replace edit.
//!
//! Paths from the model are resolved against a root directory (normally the
//! process working directory). There is no sandbox: absolute paths and `..`
//! are honoured as given.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use tracing::debug;
use walkdir::WalkDir;

use super::base::{optional_string, require_string, Tool};
use super::error::ToolError;

// ─────────────────────────────────────────────
// Shared path helpers
// ─────────────────────────────────────────────

/// Resolve a model-supplied path against `root`.
fn resolve_path(root: &Path, path: &str) -> Result<PathBuf, ToolError> {
    if path.is_empty() {
        return Err(ToolError::InvalidArguments("path must not be empty".into()));
    }
    Ok(root.join(path))
}

/// Whether anything exists at `path` (without following a dangling symlink into an error).
fn exists(path: &Path, display: &str) -> Result<bool, ToolError> {
    path.try_exists().map_err(|e| ToolError::io(display, e))
}

// ─────────────────────────────────────────────
// ReadFileTool
// ─────────────────────────────────────────────

/// Returns the full text contents of a file.
pub struct ReadFileTool {
    root: PathBuf,
}

impl ReadFileTool {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl Tool for ReadFileTool {
    fn name(&self) -> &str {
        "read_file"
    }

    fn description(&self) -> &str {
        "Read the contents of a given relative file path. Use this when you want to see what's \
         inside a file. Do not use this with directory names."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "The relative path of a file in the working directory."
                }
            },
            "required": ["path"]
        })
    }

    async fn execute(&self, params: &Map<String, Value>) -> Result<String, ToolError> {
        let path_str = require_string(params, "path")?;
        let path = resolve_path(&self.root, &path_str)?;

        if !exists(&path, &path_str)? {
            return Err(ToolError::FileNotFound(path_str));
        }
        if path.is_dir() {
            return Err(ToolError::InvalidArguments(format!(
                "{path_str} is a directory, not a file"
            )));
        }

        let content = std::fs::read_to_string(&path).map_err(|e| ToolError::io(&path_str, e))?;
        debug!(path = %path_str, bytes = content.len(), "read file");
        Ok(content)
    }
}

// ─────────────────────────────────────────────
// ListFilesTool
// ─────────────────────────────────────────────

/// Recursively lists every entry under a directory as a JSON array.
pub struct ListFilesTool {
    root: PathBuf,
}

impl ListFilesTool {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

/// Walk `dir` and return every entry's path relative to it, `/`-separated,
/// directories suffixed with `/`, sorted lexicographically.
pub fn list_tree(dir: &Path, display: &str) -> Result<Vec<String>, ToolError> {
    let mut entries = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1) {
        let entry = entry.map_err(|e| {
            let source = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("filesystem loop detected"));
            ToolError::io(display, source)
        })?;

        let rel = entry.path().strip_prefix(dir).unwrap_or(entry.path());
        let mut name = rel
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .collect::<Vec<_>>()
            .join("/");
        if entry.file_type().is_dir() {
            name.push('/');
        }
        entries.push(name);
    }

    entries.sort();
    Ok(entries)
}

#[async_trait]
impl Tool for ListFilesTool {
    fn name(&self) -> &str {
        "list_files"
    }

    fn description(&self) -> &str {
        "List files and directories at a given path. If no path is provided, lists files in the \
         current directory."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "Optional relative path to list files from. Defaults to current directory if not provided."
                }
            },
            "required": []
        })
    }

    async fn execute(&self, params: &Map<String, Value>) -> Result<String, ToolError> {
        let path_str = optional_string(params, "path")?
            .filter(|p| !p.is_empty())
            .unwrap_or_else(|| ".".to_string());
        let path = resolve_path(&self.root, &path_str)?;

        if !exists(&path, &path_str)? {
            return Err(ToolError::FileNotFound(path_str));
        }
        if !path.is_dir() {
            return Err(ToolError::InvalidArguments(format!(
                "{path_str} is not a directory"
            )));
        }

        let entries = list_tree(&path, &path_str)?;
        debug!(path = %path_str, entries = entries.len(), "listed directory");
        serde_json::to_string(&entries)
            .map_err(|e| ToolError::io(&path_str, std::io::Error::other(e)))
    }
}

// ─────────────────────────────────────────────
// EditFileTool
// ─────────────────────────────────────────────

/// Search-and-replace editing that refuses anything but a single, unambiguous match.
pub struct EditFileTool {
    root: PathBuf,
}

impl EditFileTool {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

/// Count occurrences of `needle` in `haystack`, overlapping ones included.
/// Returns the count and the byte offset of the first occurrence.
fn find_occurrences(haystack: &str, needle: &str) -> (usize, Option<usize>) {
    let mut count = 0;
    let mut first = None;
    let mut start = 0;

    while let Some(pos) = haystack[start..].find(needle) {
        let at = start + pos;
        first.get_or_insert(at);
        count += 1;
        // Step one character past the match start so overlaps are seen.
        let step = haystack[at..].chars().next().map_or(1, char::len_utf8);
        start = at + step;
        if start > haystack.len() {
            break;
        }
    }

    (count, first)
}

/// Replace the single occurrence of `old` in `content` with `new`.
///
/// `path` is only used for error messages.
pub fn replace_unique(content: &str, old: &str, new: &str, path: &str) -> Result<String, ToolError> {
    if old.is_empty() {
        // An empty pattern matches an empty file exactly once and any other
        // file at every position.
        return if content.is_empty() {
            Ok(new.to_string())
        } else {
            Err(ToolError::AmbiguousMatch {
                path: path.to_string(),
                count: content.chars().count() + 1,
            })
        };
    }

    match find_occurrences(content, old) {
        (0, _) => Err(ToolError::PatternNotFound {
            path: path.to_string(),
        }),
        (1, Some(at)) => {
            let mut updated = String::with_capacity(content.len() - old.len() + new.len());
            updated.push_str(&content[..at]);
            updated.push_str(new);
            updated.push_str(&content[at + old.len()..]);
            Ok(updated)
        }
        (count, _) => Err(ToolError::AmbiguousMatch {
            path: path.to_string(),
            count,
        }),
    }
}

#[async_trait]
impl Tool for EditFileTool {
    fn name(&self) -> &str {
        "edit_file"
    }

    fn description(&self) -> &str {
        "Make edits to a text file.\n\n\
         Replaces 'old_str' with 'new_str' in the given file. 'old_str' and 'new_str' MUST be \
         different from each other. 'old_str' must match exactly one location in the file; the \
         edit is rejected if it matches zero or several times.\n\n\
         If the file specified with path doesn't exist and 'old_str' is empty, it will be \
         created with 'new_str' as its contents."
    }

    fn parameters(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "path": {
                    "type": "string",
                    "description": "The path to the file"
                },
                "old_str": {
                    "type": "string",
                    "description": "Text to search for - must match exactly and must only have one match exactly"
                },
                "new_str": {
                    "type": "string",
                    "description": "Text to replace old_str with"
                }
            },
            "required": ["path", "old_str", "new_str"]
        })
    }

    async fn execute(&self, params: &Map<String, Value>) -> Result<String, ToolError> {
        let path_str = require_string(params, "path")?;
        let old_str = require_string(params, "old_str")?;
        let new_str = require_string(params, "new_str")?;

        if old_str == new_str {
            return Err(ToolError::InvalidArguments(
                "old_str and new_str must be different".into(),
            ));
        }
        let path = resolve_path(&self.root, &path_str)?;

        if !exists(&path, &path_str)? {
            if !old_str.is_empty() {
                return Err(ToolError::FileNotFound(path_str));
            }
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| ToolError::io(&path_str, e))?;
            }
            std::fs::write(&path, &new_str).map_err(|e| ToolError::io(&path_str, e))?;
            debug!(path = %path_str, bytes = new_str.len(), "created file");
            return Ok(format!("Successfully created file {path_str}"));
        }

        if path.is_dir() {
            return Err(ToolError::InvalidArguments(format!(
                "{path_str} is a directory, not a file"
            )));
        }

        let content = std::fs::read_to_string(&path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ToolError::FileNotFound(path_str.clone()),
            _ => ToolError::io(&path_str, e),
        })?;
        let updated = replace_unique(&content, &old_str, &new_str, &path_str)?;

        std::fs::write(&path, &updated).map_err(|e| ToolError::io(&path_str, e))?;
        debug!(path = %path_str, before = content.len(), after = updated.len(), "edited file");
        Ok("OK".to_string())
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
