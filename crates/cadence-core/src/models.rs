//! Domain models for Cadence

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A single ledger transaction.
///
/// The grouping engine only reads these; a transaction's identity is its
/// position in the slice handed to the engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub date: NaiveDate,
    /// Signed amount as exported by the bank/aggregator
    pub amount: f64,
    /// Cleaned-up description (what the ledger shows)
    pub description: String,
    /// Raw statement description, used for grouping
    pub original_description: String,
    pub category: String,
    /// "debit" or "credit" in Mint-style exports
    pub transaction_type: String,
}

impl Transaction {
    /// Create a debit transaction whose original description equals its description
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        amount: f64,
        category: impl Into<String>,
    ) -> Self {
        let description = description.into();
        Self {
            date,
            amount,
            original_description: description.clone(),
            description,
            category: category.into(),
            transaction_type: "debit".to_string(),
        }
    }

    pub fn with_original_description(mut self, original: impl Into<String>) -> Self {
        self.original_description = original.into();
        self
    }

    pub fn with_transaction_type(mut self, transaction_type: impl Into<String>) -> Self {
        self.transaction_type = transaction_type.into();
        self
    }
}

/// Periodicity of a recurring group
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Frequency {
    Monthly,
    Weekly,
    Annually,
    Irregular,
}

impl Frequency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "Monthly",
            Self::Weekly => "Weekly",
            Self::Annually => "Annually",
            Self::Irregular => "Irregular",
        }
    }
}

impl std::str::FromStr for Frequency {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "monthly" => Ok(Self::Monthly),
            "weekly" => Ok(Self::Weekly),
            "annually" | "yearly" => Ok(Self::Annually),
            "irregular" => Ok(Self::Irregular),
            _ => Err(format!("Unknown frequency: {}", s)),
        }
    }
}

impl std::fmt::Display for Frequency {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A cluster of transactions sharing a normalized description key
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DescriptionGroup {
    /// Normalized key (prefix label or the description itself)
    pub key: String,
    /// Transaction indices in append order. The same index can appear more
    /// than once when a key is queried again from a later description.
    pub member_indices: Vec<usize>,
    /// Descriptions that were first marked processed by this group
    pub claimed_descriptions: Vec<String>,
}

/// Transactions sharing the same amount rounded to cents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AmountGroup {
    pub amount_cents: i64,
    /// Ascending transaction indices
    pub indices: Vec<usize>,
}

impl AmountGroup {
    pub fn amount(&self) -> f64 {
        self.amount_cents as f64 / 100.0
    }
}

/// One row of the recurring spend report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportRow {
    #[serde(rename = "Group Key")]
    pub group_key: String,
    #[serde(rename = "Category")]
    pub category: String,
    #[serde(rename = "Transaction Count")]
    pub transaction_count: usize,
    #[serde(rename = "Total Amount")]
    pub total_amount: f64,
    #[serde(rename = "Frequency")]
    pub frequency: Frequency,
}
