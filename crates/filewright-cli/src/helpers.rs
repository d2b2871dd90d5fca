//! Shared CLI helpers — path expansion, colored output, the one-shot channel.

use std::io;
use std::path::PathBuf;

use colored::Colorize;
use serde_json::{Map, Value};

use filewright_agent::HumanChannel;
use filewright_core::utils::{home_dir, truncate_string};

/// Longest argument string echoed for a tool call.
const MAX_ARGS_DISPLAY: usize = 200;

/// Expand `~` at the start of a path to the user's home directory.
pub fn expand_tilde(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}

/// The `You: ` prompt.
pub fn prompt() -> String {
    format!("{}: ", "You".blue().bold())
}

/// Format an assistant text block.
pub fn format_assistant(text: &str) -> String {
    format!("{}: {}", "Claude".yellow().bold(), text)
}

/// Format a tool invocation as `tool: name({...})`.
pub fn format_tool_request(name: &str, arguments: &Map<String, Value>) -> String {
    let args = serde_json::to_string(arguments).unwrap_or_else(|_| "{}".into());
    format!(
        "{}: {}({})",
        "tool".green().bold(),
        name,
        truncate_string(&args, MAX_ARGS_DISPLAY)
    )
}

pub fn print_notice(text: &str) {
    eprintln!("{} {}", "!".yellow().bold(), text.dimmed());
}

/// Print the banner shown at REPL start.
pub fn print_banner() {
    let version = env!("CARGO_PKG_VERSION");
    println!();
    println!("{}  v{}", "Filewright".cyan().bold(), version.dimmed());
    println!(
        "{}",
        "Chat with Claude (use 'exit' or Ctrl-D to quit).".dimmed()
    );
    println!();
}

// ─────────────────────────────────────────────
// One-shot channel
// ─────────────────────────────────────────────

/// Hands the loop a single message, then reports end of input.
pub struct OneShotChannel {
    message: Option<String>,
}

impl OneShotChannel {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: Some(message.into()),
        }
    }
}

impl HumanChannel for OneShotChannel {
    fn read_line(&mut self) -> io::Result<Option<String>> {
        Ok(self.message.take())
    }

    fn show_text(&mut self, text: &str) {
        println!("{}", format_assistant(text));
    }

    fn show_tool_request(&mut self, name: &str, arguments: &Map<String, Value>) {
        println!("{}", format_tool_request(name, arguments));
    }

    fn notice(&mut self, text: &str) {
        print_notice(text);
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
