//! Report export
//!
//! Supports:
//! - Recurring spend report as CSV (one row per group) or JSON
//! - Recurring amount groups as CSV

use serde::Serialize;
use std::io::Write;

use crate::error::Result;
use crate::models::{AmountGroup, ReportRow};

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    #[default]
    Csv,
    Json,
}

impl ExportFormat {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Csv => "csv",
            Self::Json => "json",
        }
    }
}

impl std::str::FromStr for ExportFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(Self::Csv),
            "json" => Ok(Self::Json),
            _ => Err(format!("Unknown export format: {}", s)),
        }
    }
}

impl std::fmt::Display for ExportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Write report rows in the requested format
pub fn write_report<W: Write>(rows: &[ReportRow], writer: W, format: ExportFormat) -> Result<()> {
    match format {
        ExportFormat::Csv => write_report_csv(rows, writer),
        ExportFormat::Json => write_report_json(rows, writer),
    }
}

/// CSV with header `Group Key,Category,Transaction Count,Total Amount,Frequency`
fn write_report_csv<W: Write>(rows: &[ReportRow], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    if rows.is_empty() {
        // serialize() only emits the header with the first record
        wtr.write_record(["Group Key", "Category", "Transaction Count", "Total Amount", "Frequency"])?;
    }
    for row in rows {
        wtr.serialize(row)?;
    }
    wtr.flush()?;
    Ok(())
}

fn write_report_json<W: Write>(rows: &[ReportRow], mut writer: W) -> Result<()> {
    serde_json::to_writer_pretty(&mut writer, rows)?;
    writeln!(writer)?;
    Ok(())
}

#[derive(Serialize)]
struct AmountGroupRecord {
    #[serde(rename = "Amount")]
    amount: String,
    #[serde(rename = "Transaction Count")]
    transaction_count: usize,
    #[serde(rename = "Indices")]
    indices: String,
}

/// Write recurring amount groups as CSV (`Amount,Transaction Count,Indices`)
pub fn write_recurring_amounts<W: Write>(groups: &[AmountGroup], writer: W) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    if groups.is_empty() {
        wtr.write_record(["Amount", "Transaction Count", "Indices"])?;
    }
    for group in groups {
        wtr.serialize(AmountGroupRecord {
            amount: format!("{:.2}", group.amount()),
            transaction_count: group.indices.len(),
            indices: group
                .indices
                .iter()
                .map(|i| i.to_string())
                .collect::<Vec<_>>()
                .join(" "),
        })?;
    }
    wtr.flush()?;
    Ok(())
}
