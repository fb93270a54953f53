//! Shared utilities for commands
//!
//! - `load_config` - Resolve and parse the configuration
//! - `load_ledger` - Read a ledger CSV and apply the configured filter

use std::path::Path;

use anyhow::{Context, Result};
use cadence_core::{import, Config, Transaction};
use tracing::info;

/// Load config from the explicit path, the override location, or built-in defaults
pub fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let (config, source) =
        Config::load_with_source(config_path).context("Failed to load configuration")?;
    info!("Using config from {}", source);
    Ok(config)
}

/// Parse a ledger CSV and keep only the transactions the filter accepts
pub fn load_ledger(config: &Config, file: &Path) -> Result<Vec<Transaction>> {
    let transactions = import::parse_csv_file(file)
        .with_context(|| format!("Failed to read ledger: {}", file.display()))?;
    let total = transactions.len();

    let kept = config.filter.apply(transactions);
    info!("Loaded {} transactions ({} after filtering)", total, kept.len());
    Ok(kept)
}
