//! CSV ledger import
//!
//! Reads Mint-style transaction exports:
//! `Date,Description,Original Description,Amount,Transaction Type,Category,Account Name,Labels,Notes`
//!
//! Columns are located by header name, so extra columns and reordering are
//! fine. Amounts are taken as exported (Mint writes them unsigned and puts
//! the direction in `Transaction Type`).

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::error::{Error, Result};
use crate::models::Transaction;

const DATE: &str = "Date";
const DESCRIPTION: &str = "Description";
const ORIGINAL_DESCRIPTION: &str = "Original Description";
const AMOUNT: &str = "Amount";
const TRANSACTION_TYPE: &str = "Transaction Type";
const CATEGORY: &str = "Category";

/// Positions of the columns we read
struct Columns {
    date: usize,
    description: usize,
    original_description: usize,
    amount: usize,
    transaction_type: usize,
    category: usize,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim() == name)
                .ok_or_else(|| Error::Input(format!("Missing column: {}", name)))
        };

        Ok(Self {
            date: find(DATE)?,
            description: find(DESCRIPTION)?,
            original_description: find(ORIGINAL_DESCRIPTION)?,
            amount: find(AMOUNT)?,
            transaction_type: find(TRANSACTION_TYPE)?,
            category: find(CATEGORY)?,
        })
    }
}

/// Parse a ledger CSV into transactions
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<Transaction>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(reader);

    let columns = Columns::from_headers(rdr.headers()?)?;
    let mut transactions = Vec::new();

    for (row, result) in rdr.records().enumerate() {
        let record = result?;
        // Quoted fields can span lines, so take the reader's line count.
        // Header is line 1.
        let line = record
            .position()
            .map_or(row as u64 + 2, |pos| pos.line());

        let field = |idx: usize, name: &str| {
            record
                .get(idx)
                .ok_or_else(|| Error::Input(format!("Line {}: missing {}", line, name)))
        };

        let date = parse_date(field(columns.date, DATE)?)
            .map_err(|e| Error::Input(format!("Line {}: {}", line, e)))?;
        let amount = parse_amount(field(columns.amount, AMOUNT)?)
            .map_err(|e| Error::Input(format!("Line {}: {}", line, e)))?;

        transactions.push(Transaction {
            date,
            amount,
            description: field(columns.description, DESCRIPTION)?.to_string(),
            original_description: field(columns.original_description, ORIGINAL_DESCRIPTION)?
                .to_string(),
            category: field(columns.category, CATEGORY)?.to_string(),
            transaction_type: field(columns.transaction_type, TRANSACTION_TYPE)?.to_string(),
        });
    }

    debug!("Parsed {} ledger transactions", transactions.len());
    Ok(transactions)
}

/// Parse a ledger CSV file
pub fn parse_csv_file(path: impl AsRef<Path>) -> Result<Vec<Transaction>> {
    let file = File::open(path.as_ref())?;
    parse_csv(file)
}

/// Parse a date in any of the common export formats
fn parse_date(s: &str) -> std::result::Result<NaiveDate, String> {
    let s = s.trim();

    let formats = [
        "%m/%d/%Y", // 01/15/2024
        "%m/%d/%y", // 01/15/24
        "%Y-%m-%d", // 2024-01-15
        "%m-%d-%Y", // 01-15-2024
    ];

    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }

    Err(format!("Unable to parse date: {}", s))
}

/// Parse an amount string, handling currency symbols and commas
fn parse_amount(s: &str) -> std::result::Result<f64, String> {
    let cleaned: String = s
        .trim()
        .replace(['$', ',', ' '], "")
        .replace('(', "-")
        .replace(')', "");

    match cleaned.parse::<f64>() {
        Ok(amount) if amount.is_finite() => Ok(amount),
        _ => Err(format!("Unable to parse amount: {}", s)),
    }
}
