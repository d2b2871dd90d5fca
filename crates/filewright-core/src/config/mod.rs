//! Configuration system — schema, loading, and env var overrides.
//!
//! # Usage
//! ```no_run
//! use filewright_core::config;
//!
//! let cfg = config::load_config(None);
//! println!("Model: {}", cfg.agent.model);
//! ```

pub mod loader;
pub mod schema;

pub use loader::{get_config_path, load_config, save_config};
pub use schema::{AgentConfig, Config, ProviderConfig, DEFAULT_MAX_CHAIN_ROUNDS, DEFAULT_MODEL};
