//! Recurring spend detection
//!
//! Runs the full grouping pipeline over an in-memory ledger:
//! - Description clustering (prefix normalization + fuzzy matching)
//! - Aggregation into report rows with category and frequency
//! - Recurring amount groups, reported separately from the rows

use tracing::info;

use crate::aggregate::aggregate;
use crate::amounts::detect_recurring_amounts;
use crate::cluster::{ClusterConfig, FuzzyClusterer};
use crate::config::Config;
use crate::error::Result;
use crate::models::{AmountGroup, DescriptionGroup, ReportRow, Transaction};
use crate::normalize::PrefixMapping;
use crate::similarity::{Scorer, TokenSetScorer};

/// Results of running detection
#[derive(Debug, Default)]
pub struct DetectionResults {
    /// Recurring groups, largest first
    pub rows: Vec<ReportRow>,
    /// Every description group, including single-member ones
    pub groups: Vec<DescriptionGroup>,
    /// Amounts seen more than once. Not merged into `rows`.
    pub amount_groups: Vec<AmountGroup>,
}

/// Main detector that runs every grouping step
pub struct RecurringDetector<S = TokenSetScorer> {
    clusterer: FuzzyClusterer<S>,
    prefixes: PrefixMapping,
}

impl RecurringDetector<TokenSetScorer> {
    /// Token-set scorer with default thresholds and no prefix rules
    pub fn new() -> Self {
        Self::with_scorer(TokenSetScorer::new(), PrefixMapping::default(), ClusterConfig::default())
    }

    /// Token-set scorer with prefixes and thresholds from config
    pub fn from_config(config: &Config) -> Self {
        Self::with_scorer(TokenSetScorer::new(), config.prefixes.clone(), config.clustering)
    }
}

impl Default for RecurringDetector<TokenSetScorer> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: Scorer> RecurringDetector<S> {
    pub fn with_scorer(scorer: S, prefixes: PrefixMapping, clustering: ClusterConfig) -> Self {
        Self {
            clusterer: FuzzyClusterer::with_config(scorer, clustering),
            prefixes,
        }
    }

    pub fn prefixes(&self) -> &PrefixMapping {
        &self.prefixes
    }

    pub fn clustering(&self) -> &ClusterConfig {
        self.clusterer.config()
    }

    /// Run detection, visiting descriptions in first-seen order
    pub fn run(&self, transactions: &[Transaction]) -> Result<DetectionResults> {
        let groups = self.clusterer.cluster(transactions, &self.prefixes);
        self.finish(groups, transactions)
    }

    /// Run detection with an explicit description scan order
    pub fn run_in_order(
        &self,
        descriptions: &[String],
        transactions: &[Transaction],
    ) -> Result<DetectionResults> {
        let groups = self
            .clusterer
            .cluster_in_order(descriptions, transactions, &self.prefixes);
        self.finish(groups, transactions)
    }

    fn finish(
        &self,
        groups: Vec<DescriptionGroup>,
        transactions: &[Transaction],
    ) -> Result<DetectionResults> {
        let rows = aggregate(&groups, transactions)?;
        let amount_groups = detect_recurring_amounts(transactions)?;

        info!(
            "Detection complete: {} transactions, {} groups, {} recurring, {} repeated amounts",
            transactions.len(),
            groups.len(),
            rows.len(),
            amount_groups.len()
        );

        Ok(DetectionResults {
            rows,
            groups,
            amount_groups,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Frequency;
    use chrono::NaiveDate;

    fn tx(y: i32, m: u32, d: u32, desc: &str, amount: f64, category: &str) -> Transaction {
        Transaction::new(NaiveDate::from_ymd_opt(y, m, d).unwrap(), desc, amount, category)
    }

    fn amazon_ledger() -> Vec<Transaction> {
        vec![
            tx(2021, 1, 1, "AMAZON RETAIL 123", 20.0, "Shopping"),
            tx(2021, 2, 1, "AMAZON RETAIL 456", 20.0, "Shopping"),
            tx(2021, 3, 2, "AMAZON RETAIL 789", 20.0, "Shopping"),
        ]
    }

    #[test]
    fn test_amazon_retail_single_row() {
        let detector = RecurringDetector::with_scorer(
            TokenSetScorer::new(),
            PrefixMapping::from_pairs([("AMAZON RETAIL", "Amazon Retail")]),
            ClusterConfig::default(),
        );
        let results = detector.run(&amazon_ledger()).unwrap();

        assert_eq!(results.rows.len(), 1);
        let row = &results.rows[0];
        assert_eq!(row.group_key, "Amazon Retail");
        assert_eq!(row.category, "Shopping");
        assert_eq!(row.transaction_count, 3);
        assert!((row.total_amount - 60.0).abs() < 1e-9);
        assert_eq!(row.frequency, Frequency::Monthly);
    }

    #[test]
    fn test_amount_groups_are_separate_from_rows() {
        let results = RecurringDetector::from_config(&Config::default())
            .run(&amazon_ledger())
            .unwrap();

        assert_eq!(results.amount_groups.len(), 1);
        assert_eq!(results.amount_groups[0].amount_cents, 2000);
        assert_eq!(results.amount_groups[0].indices, vec![0, 1, 2]);
        assert_eq!(results.rows.len(), 1);
    }

    #[test]
    fn test_empty_ledger() {
        let results = RecurringDetector::new().run(&[]).unwrap();
        assert!(results.rows.is_empty());
        assert!(results.groups.is_empty());
        assert!(results.amount_groups.is_empty());
    }

    #[test]
    fn test_run_in_order_with_fake_scorer() {
        // Everything matches everything: the first visited description owns all
        let scorer = |_: &str, _: &str| -> u8 { 100 };
        let detector = RecurringDetector::with_scorer(
            scorer,
            PrefixMapping::default(),
            ClusterConfig::default(),
        );
        let ledger = vec![
            tx(2021, 1, 1, "A", 1.0, "X"),
            tx(2021, 1, 2, "B", 2.0, "X"),
        ];
        let order = vec!["B".to_string(), "A".to_string()];
        let results = detector.run_in_order(&order, &ledger).unwrap();

        assert_eq!(results.groups.len(), 1);
        assert_eq!(results.rows[0].group_key, "B");
        assert_eq!(results.rows[0].transaction_count, 2);
    }

    #[test]
    fn test_punctuation_only_descriptions_give_no_rows() {
        let ledger = vec![
            tx(2021, 1, 1, "***", 5.0, "Misc"),
            tx(2021, 2, 1, "---", 5.0, "Misc"),
        ];
        let results = RecurringDetector::new().run(&ledger).unwrap();
        assert!(results.rows.is_empty());
    }

    #[test]
    fn test_non_latin_vendors_stay_apart() {
        let ledger = vec![
            tx(2021, 1, 1, "東京 STORE", 5.0, "Misc"),
            tx(2021, 2, 1, "大阪 STORE", 6.0, "Misc"),
        ];
        let results = RecurringDetector::new().run(&ledger).unwrap();
        assert!(results.rows.is_empty());
        assert_eq!(results.groups.len(), 2);
    }

    #[test]
    fn test_non_finite_amount_is_error() {
        let ledger = vec![
            tx(2021, 1, 1, "NETFLIX", 15.99, "Video"),
            tx(2021, 2, 1, "NETFLIX", f64::INFINITY, "Video"),
        ];
        assert!(RecurringDetector::new().run(&ledger).is_err());
    }
}
