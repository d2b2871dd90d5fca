//! Interactive REPL channel.
//!
//! Uses `rustyline` for readline-style editing with persistent history.

use std::io;
use std::path::PathBuf;

use anyhow::Result;
use rustyline::config::Configurer;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use serde_json::{Map, Value};
use tracing::debug;

use filewright_agent::HumanChannel;
use filewright_core::utils::get_history_path;

use crate::helpers;

/// Exit commands (case-insensitive match).
const EXIT_COMMANDS: &[&str] = &["exit", "quit", "/exit", "/quit", ":q"];

/// A [`HumanChannel`] reading from the terminal. History is saved on drop.
pub struct ReplChannel {
    editor: DefaultEditor,
    history_path: PathBuf,
}

impl ReplChannel {
    pub fn new() -> Result<Self> {
        let mut editor = DefaultEditor::new()?;
        editor.set_max_history_size(1000)?;

        let history_path = get_history_path();
        if history_path.exists() {
            let _ = editor.load_history(&history_path);
            debug!("loaded REPL history from {}", history_path.display());
        }

        Ok(Self {
            editor,
            history_path,
        })
    }
}

impl HumanChannel for ReplChannel {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        match self.editor.readline(&helpers::prompt()) {
            Ok(line) => {
                let trimmed = line.trim();
                if is_exit_command(trimmed) {
                    println!("\nGoodbye!");
                    return Ok(None);
                }
                if !trimmed.is_empty() {
                    let _ = self.editor.add_history_entry(trimmed);
                }
                Ok(Some(line))
            }
            // Ctrl-C / Ctrl-D
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => Ok(None),
            Err(ReadlineError::Io(e)) => Err(e),
            Err(e) => Err(io::Error::other(e.to_string())),
        }
    }

    fn show_text(&mut self, text: &str) {
        println!("{}", helpers::format_assistant(text));
    }

    fn show_tool_request(&mut self, name: &str, arguments: &Map<String, Value>) {
        println!("{}", helpers::format_tool_request(name, arguments));
    }

    fn notice(&mut self, text: &str) {
        helpers::print_notice(text);
    }
}

impl Drop for ReplChannel {
    fn drop(&mut self) {
        if let Some(parent) = self.history_path.parent() {
            let _ = std::fs::create_dir_all(parent);
        }
        if let Err(e) = self.editor.save_history(&self.history_path) {
            debug!("failed to save history: {e}");
        }
    }
}

/// Check if input is an exit command.
fn is_exit_command(input: &str) -> bool {
    let lower = input.to_lowercase();
    EXIT_COMMANDS.contains(&lower.as_str())
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
