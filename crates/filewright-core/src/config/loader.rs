//! Config loader — reads `~/.filewright/config.json` and merges env vars.
//!
//! # Loading precedence
//! 1. Defaults (from `Config::default()`)
//! 2. JSON file at `~/.filewright/config.json`
//! 3. Environment variables `FILEWRIGHT_<SECTION>__<FIELD>` (override JSON)
//! 4. `ANTHROPIC_API_KEY`, only when no key was set by the steps above

use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

use super::schema::Config;

/// Default config file path.
pub fn get_config_path() -> PathBuf {
    crate::utils::get_data_path().join("config.json")
}

/// Load configuration from the default path + env vars.
///
/// Falls back to `Config::default()` if the file doesn't exist or can't be parsed.
pub fn load_config(path: Option<&Path>) -> Config {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);
    apply_env_overrides(load_config_from_path(&config_path))
}

/// Load config from a specific file path, without env overrides.
fn load_config_from_path(path: &Path) -> Config {
    if !path.exists() {
        info!("No config file found at {}, using defaults", path.display());
        return Config::default();
    }

    debug!("Loading config from {}", path.display());

    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(e) => {
            warn!("Failed to read config file {}: {}", path.display(), e);
            return Config::default();
        }
    };

    match serde_json::from_str(&content) {
        Ok(config) => config,
        Err(e) => {
            warn!("Failed to parse config {}: {}", path.display(), e);
            Config::default()
        }
    }
}

/// Save configuration to disk (pretty-printed JSON with camelCase keys).
pub fn save_config(config: &Config, path: Option<&Path>) -> std::io::Result<()> {
    let config_path = path.map(PathBuf::from).unwrap_or_else(get_config_path);

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(config).map_err(std::io::Error::other)?;

    std::fs::write(&config_path, json)?;
    debug!("Config saved to {}", config_path.display());
    Ok(())
}

/// Apply environment variable overrides on top of a loaded config.
///
/// Supported overrides:
/// - `FILEWRIGHT_AGENT__MODEL` → `agent.model`
/// - `FILEWRIGHT_AGENT__MAX_TOKENS` → `agent.max_tokens`
/// - `FILEWRIGHT_AGENT__MAX_CHAIN_ROUNDS` → `agent.max_chain_rounds`
/// - `FILEWRIGHT_AGENT__WORKSPACE` → `agent.workspace`
/// - `FILEWRIGHT_PROVIDER__API_KEY` → `provider.api_key`
/// - `FILEWRIGHT_PROVIDER__API_BASE` → `provider.api_base`
fn apply_env_overrides(config: Config) -> Config {
    apply_overrides(config, |key| std::env::var(key).ok())
}

/// Override logic, parameterised over the variable source so tests need not
/// touch the process environment.
fn apply_overrides(mut config: Config, var: impl Fn(&str) -> Option<String>) -> Config {
    if let Some(val) = var("FILEWRIGHT_AGENT__MODEL") {
        config.agent.model = val;
    }
    if let Some(val) = var("FILEWRIGHT_AGENT__MAX_TOKENS") {
        match val.parse::<u32>() {
            Ok(n) => config.agent.max_tokens = n,
            Err(_) => warn!(value = %val, "ignoring invalid FILEWRIGHT_AGENT__MAX_TOKENS"),
        }
    }
    if let Some(val) = var("FILEWRIGHT_AGENT__MAX_CHAIN_ROUNDS") {
        match val.parse::<u32>() {
            Ok(n) => config.agent.max_chain_rounds = n,
            Err(_) => warn!(value = %val, "ignoring invalid FILEWRIGHT_AGENT__MAX_CHAIN_ROUNDS"),
        }
    }
    if let Some(val) = var("FILEWRIGHT_AGENT__WORKSPACE") {
        config.agent.workspace = val;
    }

    if let Some(val) = var("FILEWRIGHT_PROVIDER__API_KEY") {
        config.provider.api_key = val;
    }
    if let Some(val) = var("FILEWRIGHT_PROVIDER__API_BASE") {
        config.provider.api_base = Some(val);
    }
    if !config.provider.is_configured() {
        if let Some(val) = var("ANTHROPIC_API_KEY") {
            config.provider.api_key = val;
        }
    }

    config
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
