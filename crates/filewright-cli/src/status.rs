//! `filewright status` — show configuration and provider status.

use anyhow::Result;
use colored::Colorize;

use filewright_agent::default_registry;
use filewright_core::config::{get_config_path, load_config};

use crate::helpers::expand_tilde;

/// Run the status command.
pub fn run() -> Result<()> {
    let config = load_config(None);
    let config_path = get_config_path();

    println!();
    println!("{}", "Filewright Status".cyan().bold());
    println!();

    println!(
        "  {:<18} {} {}",
        "Config:".bold(),
        config_path.display(),
        found_marker(config_path.exists())
    );

    let workspace = expand_tilde(&config.agent.workspace);
    println!(
        "  {:<18} {} {}",
        "Workspace:".bold(),
        workspace.display(),
        found_marker(workspace.is_dir())
    );

    println!("  {:<18} {}", "Model:".bold(), config.agent.model);
    println!(
        "  {:<18} {}",
        "Parameters:".bold(),
        format!(
            "max_tokens: {} | max_chain_rounds: {}",
            config.agent.max_tokens, config.agent.max_chain_rounds
        )
        .dimmed(),
    );

    let key_status = if config.provider.is_configured() {
        format!("{} (key set)", "✓".green())
    } else {
        format!("{}", "· not configured".dimmed())
    };
    println!("  {:<18} {}", "Anthropic:".bold(), key_status);
    if let Some(base) = &config.provider.api_base {
        println!("  {:<18} {}", "API base:".bold(), base);
    }

    let tools = default_registry(&workspace).tool_names();
    println!("  {:<18} {}", "Tools:".bold(), tools.join(", "));
    println!();

    Ok(())
}

fn found_marker(found: bool) -> String {
    if found {
        "✓".green().to_string()
    } else {
        "(not found)".red().to_string()
    }
}
