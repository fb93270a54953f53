//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Cadence - Find recurring spend in a transaction ledger
#[derive(Parser)]
#[command(name = "cadence")]
#[command(about = "Group a transaction ledger into recurring spend", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Config file (defaults to ~/.config/cadence/cadence.toml, then built-in defaults)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Build the recurring spend report from a ledger CSV
    Report {
        /// Ledger CSV (Mint export format)
        #[arg(short, long)]
        file: PathBuf,

        /// Output file (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Output format: csv, json
        #[arg(long, default_value = "csv")]
        format: String,

        /// Only include transactions from this year on (overrides config)
        #[arg(long)]
        min_year: Option<i32>,

        /// Also list amounts charged more than once
        #[arg(long)]
        amounts: bool,
    },

    /// List amounts charged more than once
    Amounts {
        /// Ledger CSV (Mint export format)
        #[arg(short, long)]
        file: PathBuf,

        /// Write CSV instead of a table
        #[arg(long)]
        csv: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show where the config override is read from
    Path,

    /// Print the effective configuration
    Show,

    /// Write the default configuration to the override path
    Init {
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}
