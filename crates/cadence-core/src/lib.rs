//! Cadence Core Library
//!
//! Groups a transaction ledger into recurring spend:
//! - CSV ledger import and boundary filtering
//! - Prefix normalization of vendor descriptions
//! - Greedy fuzzy clustering with a pluggable similarity scorer
//! - Recurring amount detection
//! - Frequency classification and report aggregation
//! - Report export (CSV, JSON) and TOML configuration

pub mod aggregate;
pub mod amounts;
pub mod cluster;
pub mod config;
pub mod detect;
pub mod error;
pub mod export;
pub mod filter;
pub mod frequency;
pub mod import;
pub mod models;
pub mod normalize;
pub mod similarity;

pub use aggregate::{aggregate, category_mode};
pub use amounts::detect_recurring_amounts;
pub use cluster::{unique_descriptions, ClusterConfig, FuzzyClusterer};
pub use config::{default_config_path, Config, ConfigSource};
pub use detect::{DetectionResults, RecurringDetector};
pub use error::{Error, Result};
pub use export::{write_recurring_amounts, write_report, ExportFormat};
pub use filter::TransactionFilter;
pub use frequency::classify_frequency;
pub use models::{AmountGroup, DescriptionGroup, Frequency, ReportRow, Transaction};
pub use normalize::{PrefixMapping, PrefixRule};
pub use similarity::{Match, Scorer, TokenSetScorer};
