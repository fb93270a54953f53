//! Recurring amount command implementation

use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use cadence_core::{detect_recurring_amounts, write_recurring_amounts, AmountGroup, Config};

use super::{load_config, load_ledger};

pub fn cmd_amounts(config_path: Option<&Path>, file: &Path, csv: bool) -> Result<()> {
    let config = load_config(config_path)?;
    let groups = recurring_amounts(&config, file)?;

    if csv {
        let mut stdout = std::io::stdout().lock();
        write_amounts_csv(&groups, &mut stdout)?;
    } else {
        print_amount_groups(&groups);
    }

    Ok(())
}

/// Amount groups of the filtered ledger
pub fn recurring_amounts(config: &Config, file: &Path) -> Result<Vec<AmountGroup>> {
    let ledger = load_ledger(config, file)?;
    detect_recurring_amounts(&ledger).context("Recurring amount detection failed")
}

/// Write amount groups as CSV and flush
pub fn write_amounts_csv<W: Write>(groups: &[AmountGroup], mut writer: W) -> Result<()> {
    write_recurring_amounts(groups, &mut writer)?;
    writer.flush()?;
    Ok(())
}

/// Print amount groups as a table
pub fn print_amount_groups(groups: &[AmountGroup]) {
    if groups.is_empty() {
        println!("No amount was charged more than once.");
        return;
    }

    println!("💲 Repeated Amounts");
    println!("   ─────────────────────────────────────────────────────────────");

    for group in groups {
        println!(
            "   {:>10} │ {:>3}x │ rows {}",
            format!("${:.2}", group.amount()),
            group.indices.len(),
            group
                .indices
                .iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
}
