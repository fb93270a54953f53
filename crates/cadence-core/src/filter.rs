//! Boundary filter applied to the ledger before grouping
//!
//! Restricts transactions to recent debits, dropping one category (usually
//! transfers between own accounts) and an explicit vendor blocklist.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::models::Transaction;

/// Builder for transaction filters
///
/// Every criterion left unset passes all transactions.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionFilter {
    /// Keep transactions dated in this year or later
    pub min_year: Option<i32>,
    /// Keep only this transaction type (exact match)
    pub transaction_type: Option<String>,
    /// Drop transactions in this category (exact match)
    pub excluded_category: Option<String>,
    /// Drop transactions whose description is one of these (exact match)
    pub excluded_vendors: Vec<String>,
}

impl TransactionFilter {
    /// Create a new filter that passes everything
    pub fn new() -> Self {
        Self::default()
    }

    /// Set minimum year
    pub fn min_year(mut self, year: Option<i32>) -> Self {
        self.min_year = year;
        self
    }

    /// Set required transaction type
    pub fn transaction_type(mut self, kind: Option<impl Into<String>>) -> Self {
        self.transaction_type = kind.map(Into::into);
        self
    }

    /// Set excluded category
    pub fn excluded_category(mut self, category: Option<impl Into<String>>) -> Self {
        self.excluded_category = category.map(Into::into);
        self
    }

    /// Set excluded vendor descriptions
    pub fn excluded_vendors<I, S>(mut self, vendors: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.excluded_vendors = vendors.into_iter().map(Into::into).collect();
        self
    }

    /// Check a single transaction
    pub fn matches(&self, tx: &Transaction) -> bool {
        if let Some(year) = self.min_year {
            if tx.date.year() < year {
                return false;
            }
        }
        if let Some(ref kind) = self.transaction_type {
            if &tx.transaction_type != kind {
                return false;
            }
        }
        if let Some(ref category) = self.excluded_category {
            if &tx.category == category {
                return false;
            }
        }
        !self.excluded_vendors.contains(&tx.description)
    }

    /// Keep matching transactions, preserving their order
    pub fn apply(&self, transactions: Vec<Transaction>) -> Vec<Transaction> {
        let before = transactions.len();
        let kept: Vec<Transaction> = transactions
            .into_iter()
            .filter(|tx| self.matches(tx))
            .collect();
        debug!("Filter kept {} of {} transactions", kept.len(), before);
        kept
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(year: i32, desc: &str, kind: &str, category: &str) -> Transaction {
        Transaction::new(NaiveDate::from_ymd_opt(year, 6, 1).unwrap(), desc, 10.0, category)
            .with_transaction_type(kind)
    }

    fn mint_filter() -> TransactionFilter {
        TransactionFilter::new()
            .min_year(Some(2019))
            .transaction_type(Some("debit"))
            .excluded_category(Some("Transfer"))
            .excluded_vendors(["Betterment", "Chase", "Citi"])
    }

    #[test]
    fn test_default_passes_everything() {
        let filter = TransactionFilter::new();
        assert!(filter.matches(&tx(1999, "Chase", "credit", "Transfer")));
    }

    #[test]
    fn test_min_year_is_inclusive() {
        let filter = mint_filter();
        assert!(filter.matches(&tx(2019, "Netflix", "debit", "Entertainment")));
        assert!(!filter.matches(&tx(2018, "Netflix", "debit", "Entertainment")));
    }

    #[test]
    fn test_transaction_type() {
        let filter = mint_filter();
        assert!(!filter.matches(&tx(2020, "Netflix", "credit", "Entertainment")));
        // Exact, case-sensitive comparison
        assert!(!filter.matches(&tx(2020, "Netflix", "Debit", "Entertainment")));
    }

    #[test]
    fn test_excluded_category_and_vendors() {
        let filter = mint_filter();
        assert!(!filter.matches(&tx(2020, "Vanguard", "debit", "Transfer")));
        assert!(!filter.matches(&tx(2020, "Chase", "debit", "Credit Card Payment")));
        assert!(filter.matches(&tx(2020, "Chase Bank Fee", "debit", "Fees")));
    }

    #[test]
    fn test_excluded_vendor_checks_description_not_original() {
        let filter = mint_filter();
        let renamed = tx(2020, "Spotify", "debit", "Music").with_original_description("Citi");
        assert!(filter.matches(&renamed));
    }

    #[test]
    fn test_apply_preserves_order() {
        let filter = mint_filter();
        let kept = filter.apply(vec![
            tx(2020, "A", "debit", "X"),
            tx(2017, "B", "debit", "X"),
            tx(2021, "C", "debit", "X"),
            tx(2021, "Citi", "debit", "X"),
            tx(2022, "D", "debit", "X"),
        ]);
        let names: Vec<_> = kept.iter().map(|t| t.description.as_str()).collect();
        assert_eq!(names, vec!["A", "C", "D"]);
    }
}
