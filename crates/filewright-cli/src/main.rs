//! Filewright CLI — entry point.
//!
//! # Commands
//!
//! - `filewright chat [-m MESSAGE]` — chat with the agent (single-shot or REPL)
//! - `filewright init` — write the default config file
//! - `filewright status` — show configuration and provider status

mod helpers;
mod init;
mod repl;
mod status;

use std::sync::Arc;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;

use filewright_agent::{AgentLoop, AgentSettings, HumanChannel};
use filewright_core::config::{load_config, Config};
use filewright_providers::AnthropicProvider;

// ─────────────────────────────────────────────
// CLI definition
// ─────────────────────────────────────────────

/// Filewright — a terminal agent that reads and edits files with Claude
#[derive(Parser)]
#[command(name = "filewright", version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Chat with the agent (single-shot or interactive REPL)
    Chat {
        /// Single message (non-interactive). Omit for REPL mode.
        #[arg(short, long)]
        message: Option<String>,

        /// Model identifier (overrides config)
        #[arg(long)]
        model: Option<String>,

        /// Directory the file tools operate in (overrides config)
        #[arg(short, long)]
        workspace: Option<String>,

        /// Enable debug logging
        #[arg(long, default_value_t = false)]
        logs: bool,
    },

    /// Write the default configuration file
    Init,

    /// Show configuration and provider status
    Status,
}

// ─────────────────────────────────────────────
// Entrypoint
// ─────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Chat {
            message,
            model,
            workspace,
            logs,
        } => {
            init_logging(logs);
            run_chat(message, model, workspace).await
        }
        Commands::Init => init::run(),
        Commands::Status => status::run(),
    }
}

// ─────────────────────────────────────────────
// Chat command
// ─────────────────────────────────────────────

async fn run_chat(
    message: Option<String>,
    model: Option<String>,
    workspace: Option<String>,
) -> Result<()> {
    let mut config = load_config(None);
    if let Some(model) = model {
        config.agent.model = model;
    }
    if let Some(workspace) = workspace {
        config.agent.workspace = workspace;
    }

    let mut agent = build_agent_loop(&config)?;

    match message {
        Some(msg) => {
            info!("processing single message");
            let mut channel = helpers::OneShotChannel::new(msg);
            drive(&mut agent, &mut channel).await
        }
        None => {
            helpers::print_banner();
            let mut channel = repl::ReplChannel::new()?;
            drive(&mut agent, &mut channel).await
        }
    }
}

/// Run the loop until input ends, a fatal error occurs, or Ctrl-C arrives.
async fn drive(agent: &mut AgentLoop, channel: &mut dyn HumanChannel) -> Result<()> {
    tokio::select! {
        result = agent.run(channel) => result.context("agent loop failed"),
        _ = tokio::signal::ctrl_c() => {
            info!("interrupted");
            println!();
            Ok(())
        }
    }
}

/// Build an `AgentLoop` from the loaded configuration.
fn build_agent_loop(config: &Config) -> Result<AgentLoop> {
    let workspace = helpers::expand_tilde(&config.agent.workspace);
    if !workspace.is_dir() {
        bail!("workspace {} is not a directory", workspace.display());
    }

    let provider = AnthropicProvider::new(&config.provider, &config.agent.model)
        .context("failed to create Anthropic provider")?;

    Ok(AgentLoop::new(
        Arc::new(provider),
        workspace,
        AgentSettings::from_config(&config.agent),
    ))
}

/// Initialize tracing/logging. `RUST_LOG` wins when set.
fn init_logging(verbose: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if verbose {
            EnvFilter::new("filewright=debug,info")
        } else {
            EnvFilter::new("warn")
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .init();
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────
