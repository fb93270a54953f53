//! Cadence CLI - Recurring spend finder
//!
//! Usage:
//!   cadence report --file CSV         Print the recurring spend report
//!   cadence amounts --file CSV        List amounts charged more than once
//!   cadence config show               Print the effective configuration

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    // Reports may go to stdout, so logs go to stderr
    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .compact()
                .with_writer(std::io::stderr),
        )
        .init();

    let config = cli.config.as_deref();

    match cli.command {
        Commands::Report {
            file,
            output,
            format,
            min_year,
            amounts,
        } => commands::cmd_report(config, &file, output.as_deref(), &format, min_year, amounts),
        Commands::Amounts { file, csv } => commands::cmd_amounts(config, &file, csv),
        Commands::Config { action } => match action {
            ConfigAction::Path => commands::cmd_config_path(config),
            ConfigAction::Show => commands::cmd_config_show(config),
            ConfigAction::Init { force } => commands::cmd_config_init(config, force),
        },
    }
}
