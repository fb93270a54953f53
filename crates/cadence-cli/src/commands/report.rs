//! Report command implementation

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use anyhow::{Context, Result};
use cadence_core::{write_report, ExportFormat, RecurringDetector, ReportRow};

use super::{load_config, load_ledger, print_amount_groups, truncate};

pub fn cmd_report(
    config_path: Option<&Path>,
    file: &Path,
    output: Option<&Path>,
    format: &str,
    min_year: Option<i32>,
    show_amounts: bool,
) -> Result<()> {
    let format: ExportFormat = format.parse().map_err(|e: String| anyhow::anyhow!(e))?;

    let mut config = load_config(config_path)?;
    if min_year.is_some() {
        config.filter.min_year = min_year;
    }

    let ledger = load_ledger(&config, file)?;
    let results = RecurringDetector::from_config(&config)
        .run(&ledger)
        .context("Recurring spend detection failed")?;

    match output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("Failed to create output file: {}", path.display()))?;
            let mut writer = BufWriter::new(file);
            write_report(&results.rows, &mut writer, format)?;
            writer.flush()?;

            print_rows(&results.rows);
            println!();
            println!(
                "✅ Wrote {} recurring groups to: {}",
                results.rows.len(),
                path.display()
            );
        }
        None => {
            let mut stdout = std::io::stdout().lock();
            write_report(&results.rows, &mut stdout, format)?;
            stdout.flush()?;
            eprintln!();
            eprintln!("# {} recurring groups", results.rows.len());
        }
    }

    if show_amounts {
        println!();
        print_amount_groups(&results.amount_groups);
    }

    Ok(())
}

fn print_rows(rows: &[ReportRow]) {
    if rows.is_empty() {
        println!("No recurring spend found.");
        return;
    }

    println!();
    println!("🔁 Recurring Spend");
    println!("   ─────────────────────────────────────────────────────────────");

    for row in rows {
        println!(
            "   {:28} │ {:16} │ {:>3}x │ {:>10} │ {}",
            truncate(&row.group_key, 28),
            truncate(&row.category, 16),
            row.transaction_count,
            format!("${:.2}", row.total_amount),
            row.frequency
        );
    }
}
