//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `auth` - Account commands (register, login, logout, whoami)
//! - `banks` - Bank card commands (list, save, delete)
//! - `dashboard` - Dashboard summary and the watch loop
//! - `export` - CSV export command
//! - `team` - Team roster command
//! - `transactions` - Transaction commands (list, add, edit, delete, bulk)

pub mod auth;
pub mod banks;
pub mod dashboard;
pub mod export;
pub mod team;
pub mod transactions;

// Re-export command functions for main.rs
pub use auth::*;
pub use banks::*;
pub use dashboard::*;
pub use export::*;
pub use team::*;
pub use transactions::*;

use anyhow::{Context, Result};
use nexora_core::{Account, GatewayConfig, Store, StoreClient};

use crate::cli::Cli;

/// Resolve gateway configuration from the environment, then apply CLI
/// overrides on top.
pub fn resolve_config(cli: &Cli) -> GatewayConfig {
    let mut config = GatewayConfig::from_env();
    if cli.api_url.is_some() {
        config.api_url = cli.api_url.clone();
    }
    if let Some(dir) = &cli.data_dir {
        config.data_dir = dir.clone();
    }
    config
}

/// Open the store backend selected by the configuration
pub fn open_store(config: &GatewayConfig) -> Result<StoreClient> {
    StoreClient::from_config(config).context("Failed to open the data store")
}

/// The signed-in account, or an error telling the user to sign in
pub fn require_session(store: &StoreClient) -> Result<Account> {
    store
        .current_session()
        .context("Not signed in. Run 'nexora login' or 'nexora register' first.")
}

/// Truncate a string to a maximum number of characters, adding "..." if
/// truncated. Counts chars, not bytes, so multi-byte text never splits
/// mid-character.
pub fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}
