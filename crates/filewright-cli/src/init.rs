//! `filewright init` — write the default configuration file.

use std::path::Path;

use anyhow::{Context, Result};
use colored::Colorize;

use filewright_core::config::{get_config_path, save_config, Config};

/// Run the init command.
pub fn run() -> Result<()> {
    println!();
    println!("{}", "Filewright Setup".cyan().bold());
    println!();

    let config_path = get_config_path();
    if write_default_config(&config_path)? {
        println!("  {} created config at {}", "✓".green(), config_path.display());
    } else {
        println!(
            "  {} config already exists at {}",
            "✓".green(),
            config_path.display()
        );
    }

    println!();
    println!(
        "Set {} (or {} in the config) and run {}.",
        "ANTHROPIC_API_KEY".bold(),
        "provider.apiKey".bold(),
        "filewright chat".cyan()
    );
    println!();

    Ok(())
}

/// Write `Config::default()` to `path` unless a file is already there.
/// Returns whether a file was written.
fn write_default_config(path: &Path) -> Result<bool> {
    if path.exists() {
        return Ok(false);
    }
    save_config(&Config::default(), Some(path))
        .with_context(|| format!("failed to write config to {}", path.display()))?;
    Ok(true)
}
