//! CLI command tests
//!
//! This module contains all tests for the CLI commands.

use std::fs;
use std::path::{Path, PathBuf};

use cadence_core::config::DEFAULT_CONFIG;
use cadence_core::Config;
use tempfile::TempDir;

use crate::commands::{self, truncate};

const LEDGER: &str = r#""Date","Description","Original Description","Amount","Transaction Type","Category","Account Name","Labels","Notes"
"1/01/2021","Amazon","AMAZON RETAIL 123","20.00","debit","Shopping","Visa","",""
"2/01/2021","Amazon","AMAZON RETAIL 456","20.00","debit","Shopping","Visa","",""
"3/02/2021","Amazon","AMAZON RETAIL 789","20.00","debit","Shopping","Visa","",""
"2/10/2021","Vanguard","ONLINE TRANSFER","300.00","debit","Transfer","Checking","",""
"4/12/2017","Amazon","AMAZON RETAIL 000","20.00","debit","Shopping","Visa","","""#;

/// Temp dir holding a ledger and a copy of the default config
fn setup() -> (TempDir, PathBuf, PathBuf) {
    let dir = TempDir::new().unwrap();
    let ledger = dir.path().join("transactions.csv");
    let config = dir.path().join("cadence.toml");
    fs::write(&ledger, LEDGER).unwrap();
    fs::write(&config, DEFAULT_CONFIG).unwrap();
    (dir, ledger, config)
}

// ========== Shared Utility Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("AMAZON MARKETPLACE", 10), "AMAZON ...");
    assert_eq!(truncate("café crème brûlée", 8), "café ...");
}

#[test]
fn test_load_ledger_applies_filter() {
    let (_dir, ledger, config) = setup();
    let config = commands::load_config(Some(config.as_path())).unwrap();
    let transactions = commands::load_ledger(&config, &ledger).unwrap();
    // Transfer and the 2017 charge are filtered out
    assert_eq!(transactions.len(), 3);
}

#[test]
fn test_load_ledger_missing_file() {
    let (dir, _ledger, config) = setup();
    let config = commands::load_config(Some(config.as_path())).unwrap();
    let result = commands::load_ledger(&config, &dir.path().join("missing.csv"));
    assert!(result.is_err());
}

// ========== Report Command Tests ==========

fn run_report(ledger: &Path, config: &Path, output: &Path, format: &str) -> String {
    commands::cmd_report(Some(config), ledger, Some(output), format, None, false).unwrap();
    fs::read_to_string(output).unwrap()
}

#[test]
fn test_cmd_report_csv() {
    let (dir, ledger, config) = setup();
    let output = dir.path().join("report.csv");

    let report = run_report(&ledger, &config, &output, "csv");
    let lines: Vec<_> = report.lines().collect();

    assert_eq!(
        lines,
        vec![
            "Group Key,Category,Transaction Count,Total Amount,Frequency",
            "Amazon Retail,Shopping,3,60.0,Monthly",
        ]
    );
}

#[test]
fn test_cmd_report_json() {
    let (dir, ledger, config) = setup();
    let output = dir.path().join("report.json");

    let report = run_report(&ledger, &config, &output, "json");
    assert!(report.contains("\"Group Key\": \"Amazon Retail\""));
    assert!(report.contains("\"Transaction Count\": 3"));
}

#[test]
fn test_cmd_report_min_year_override() {
    let (dir, ledger, config) = setup();
    let output = dir.path().join("report.csv");

    commands::cmd_report(
        Some(config.as_path()),
        &ledger,
        Some(output.as_path()),
        "csv",
        Some(2010),
        true,
    )
    .unwrap();
    let report = fs::read_to_string(&output).unwrap();
    // The 2017 charge now joins the group
    assert!(report.contains("Amazon Retail,Shopping,4,80.0,"));
}

#[test]
fn test_cmd_report_unknown_format() {
    let (dir, ledger, config) = setup();
    let output = dir.path().join("report.xml");
    let result = commands::cmd_report(
        Some(config.as_path()),
        &ledger,
        Some(output.as_path()),
        "xml",
        None,
        false,
    );
    assert!(result.is_err());
    assert!(!output.exists());
}

#[test]
fn test_cmd_report_bad_config() {
    let (dir, ledger, config) = setup();
    fs::write(&config, "[clustering]\nsimilarity_threshold = 250\n").unwrap();
    let output = dir.path().join("report.csv");
    let result = commands::cmd_report(
        Some(config.as_path()),
        &ledger,
        Some(output.as_path()),
        "csv",
        None,
        false,
    );
    assert!(result.is_err());
}

// ========== Amounts Command Tests ==========

#[test]
fn test_cmd_amounts() {
    let (_dir, ledger, config) = setup();
    assert!(commands::cmd_amounts(Some(config.as_path()), &ledger, false).is_ok());
    assert!(commands::cmd_amounts(Some(config.as_path()), &ledger, true).is_ok());
}

#[test]
fn test_recurring_amounts_of_filtered_ledger() {
    let (_dir, ledger, config) = setup();
    let config = commands::load_config(Some(config.as_path())).unwrap();

    let groups = commands::recurring_amounts(&config, &ledger).unwrap();
    // The 2017 charge is filtered out; the transfer amount appears once
    assert_eq!(groups.len(), 1);
    assert_eq!(groups[0].amount_cents, 2000);
    assert_eq!(groups[0].indices, vec![0, 1, 2]);

    let mut out = Vec::new();
    commands::write_amounts_csv(&groups, &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Amount,Transaction Count,Indices\n20.00,3,0 1 2\n"
    );
}

#[test]
fn test_recurring_amounts_none_repeated() {
    let (_dir, ledger, config) = setup();
    let mut config = commands::load_config(Some(config.as_path())).unwrap();
    config.filter.excluded_vendors = vec!["Amazon".to_string()];

    let groups = commands::recurring_amounts(&config, &ledger).unwrap();
    assert!(groups.is_empty());

    let mut out = Vec::new();
    commands::write_amounts_csv(&groups, &mut out).unwrap();
    assert_eq!(
        String::from_utf8(out).unwrap(),
        "Amount,Transaction Count,Indices\n"
    );
}

// ========== Config Command Tests ==========

#[test]
fn test_cmd_config_init_and_show() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("cadence.toml");

    commands::cmd_config_init(Some(path.as_path()), false).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), DEFAULT_CONFIG);
    assert!(commands::cmd_config_show(Some(path.as_path())).is_ok());
    assert!(commands::cmd_config_path(Some(path.as_path())).is_ok());
}

#[test]
fn test_cmd_config_init_refuses_overwrite() {
    let (_dir, _ledger, config) = setup();
    fs::write(&config, "[filter]\nmin_year = 2023\n").unwrap();

    assert!(commands::cmd_config_init(Some(config.as_path()), false).is_err());
    let loaded = Config::load(Some(config.as_path())).unwrap();
    assert_eq!(loaded.filter.min_year, Some(2023));

    commands::cmd_config_init(Some(config.as_path()), true).unwrap();
    let loaded = Config::load(Some(config.as_path())).unwrap();
    assert_eq!(loaded.filter.min_year, Some(2019));
}

#[test]
fn test_cmd_config_show_missing_file() {
    let dir = TempDir::new().unwrap();
    let result = commands::cmd_config_show(Some(dir.path().join("none.toml").as_path()));
    assert!(result.is_err());
}
