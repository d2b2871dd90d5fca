//! Utility helpers — data paths and string truncation.

use std::path::PathBuf;

/// Get the Filewright data directory (e.g. `~/.filewright/`).
pub fn get_data_path() -> PathBuf {
    let home = home_dir().unwrap_or_else(|| PathBuf::from("."));
    home.join(".filewright")
}

/// Path of the REPL history file.
pub fn get_history_path() -> PathBuf {
    get_data_path().join("history")
}

/// Truncate a string to `max_len` characters, adding "..." if truncated.
/// Unicode-safe.
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", truncated)
    }
}

/// The user's home directory; every `~` lookup in Filewright goes through here.
pub fn home_dir() -> Option<PathBuf> {
    dirs_next::home_dir()
}
