//! CLI command tests
//!
//! This module contains all tests for the CLI commands. Commands open the
//! database by path, so each test works against a temp-directory database.

use std::io::Write;
use std::path::PathBuf;

use paisa_core::forecast::{ForecastParams, ScenarioInputs};

use crate::commands::{self, truncate};

fn test_db_path(dir: &tempfile::TempDir) -> PathBuf {
    dir.path().join("paisa.db")
}

fn write_statement(dir: &tempfile::TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(content.as_bytes()).unwrap();
    path
}

// ========== Core Command Tests ==========

#[test]
fn test_cmd_init_creates_database() {
    let dir = tempfile::tempdir().unwrap();
    let db = test_db_path(&dir);

    assert!(commands::cmd_init(&db).is_ok());
    assert!(db.exists());
}

#[test]
fn test_cmd_status_on_fresh_database() {
    let dir = tempfile::tempdir().unwrap();
    let db = test_db_path(&dir);
    commands::cmd_init(&db).unwrap();

    assert!(commands::cmd_status(&db).is_ok());
}

#[test]
fn test_cmd_set_limit_rejects_non_positive() {
    let dir = tempfile::tempdir().unwrap();
    let db = test_db_path(&dir);
    commands::cmd_init(&db).unwrap();

    assert!(commands::cmd_set_limit(&db, 0.0).is_err());
    assert!(commands::cmd_set_limit(&db, -50.0).is_err());
    assert!(commands::cmd_set_limit(&db, 30000.0).is_ok());
}

// ========== Ingest Command Tests ==========

#[test]
fn test_cmd_ingest_alert() {
    let dir = tempfile::tempdir().unwrap();
    let db = test_db_path(&dir);
    commands::cmd_init(&db).unwrap();

    let result = commands::cmd_ingest(
        &db,
        "HDFC Bank: Rs 500 spent at Uber on 2024-01-05",
        Some("2024-01-06"),
    );
    assert!(result.is_ok());

    let db = commands::open_db(&db).unwrap();
    assert_eq!(db.count_transactions().unwrap(), 1);
}

#[test]
fn test_cmd_ingest_rejects_bad_received_date() {
    let dir = tempfile::tempdir().unwrap();
    let db = test_db_path(&dir);
    commands::cmd_init(&db).unwrap();

    let result = commands::cmd_ingest(&db, "Rs 500 spent", Some("06-01-2024"));
    assert!(result.is_err());
}

#[test]
fn test_cmd_import_statement() {
    let dir = tempfile::tempdir().unwrap();
    let db = test_db_path(&dir);
    commands::cmd_init(&db).unwrap();

    let file = write_statement(
        &dir,
        "statement.csv",
        "Date,Amount,Description\n2024-01-05,299.50,Zomato order\n2024-01-06,120.00,Uber trip\n",
    );
    assert!(commands::cmd_import(&db, &file).is_ok());

    let db = commands::open_db(&db).unwrap();
    assert_eq!(db.count_transactions().unwrap(), 2);
}

#[test]
fn test_cmd_import_missing_file() {
    let dir = tempfile::tempdir().unwrap();
    let db = test_db_path(&dir);
    commands::cmd_init(&db).unwrap();

    let result = commands::cmd_import(&db, &dir.path().join("no-such.csv"));
    assert!(result.is_err());
}

#[test]
fn test_cmd_ledger_upload() {
    let dir = tempfile::tempdir().unwrap();
    let db = test_db_path(&dir);
    commands::cmd_init(&db).unwrap();

    let file = write_statement(
        &dir,
        "history.csv",
        "Date,Amount,Description\n2024-01-01,45000.00,Salary\n2024-01-20,(38000.00),Expenses\n",
    );
    assert!(commands::cmd_ledger(&db, &file).is_ok());

    let db = commands::open_db(&db).unwrap();
    assert_eq!(db.list_ledger().unwrap().len(), 2);
}

// ========== Report Command Tests ==========

#[test]
fn test_report_commands_on_empty_database() {
    let dir = tempfile::tempdir().unwrap();
    let db = test_db_path(&dir);
    commands::cmd_init(&db).unwrap();

    // Empty data yields empty reports, never errors
    assert!(commands::cmd_gauge(&db, false).is_ok());
    assert!(commands::cmd_compare(&db, Some(2024), Some(2), false).is_ok());
    assert!(commands::cmd_recurring(&db, 3, 2, false).is_ok());
    assert!(commands::cmd_merchants(&db, 10, false).is_ok());
    assert!(commands::cmd_trends(&db, false).is_ok());
}

#[test]
fn test_report_commands_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let db = test_db_path(&dir);
    commands::cmd_init(&db).unwrap();

    let file = write_statement(
        &dir,
        "statement.csv",
        "Date,Amount,Description\n2024-01-05,299.50,Zomato order\n",
    );
    commands::cmd_import(&db, &file).unwrap();

    assert!(commands::cmd_gauge(&db, true).is_ok());
    assert!(commands::cmd_compare(&db, Some(2024), Some(1), true).is_ok());
    assert!(commands::cmd_recurring(&db, 3, 2, true).is_ok());
    assert!(commands::cmd_merchants(&db, 10, true).is_ok());
    assert!(commands::cmd_trends(&db, true).is_ok());
}

// ========== Forecast Command Tests ==========

#[test]
fn test_cmd_forecast_without_history() {
    let dir = tempfile::tempdir().unwrap();
    let db = test_db_path(&dir);
    commands::cmd_init(&db).unwrap();

    // No ledger uploaded: warns but still produces a projection
    assert!(commands::cmd_forecast(&db, ForecastParams::default(), false).is_ok());
}

#[test]
fn test_cmd_forecast_with_history() {
    let dir = tempfile::tempdir().unwrap();
    let db = test_db_path(&dir);
    commands::cmd_init(&db).unwrap();

    let file = write_statement(
        &dir,
        "history.csv",
        "Date,Amount,Description\n2024-01-01,45000.00,Salary\n2024-01-20,(38000.00),Expenses\n",
    );
    commands::cmd_ledger(&db, &file).unwrap();

    assert!(commands::cmd_forecast(&db, ForecastParams::default(), false).is_ok());
    assert!(commands::cmd_forecast(&db, ForecastParams::default(), true).is_ok());
}

#[test]
fn test_cmd_simulate() {
    assert!(commands::cmd_simulate(ScenarioInputs::default(), false).is_ok());
    assert!(commands::cmd_simulate(ScenarioInputs::default(), true).is_ok());
}

// ========== Chat Command Tests ==========

#[test]
fn test_cmd_chat_runs_on_fresh_database() {
    let dir = tempfile::tempdir().unwrap();
    let db = test_db_path(&dir);
    commands::cmd_init(&db).unwrap();

    assert!(commands::cmd_chat(&db, "how much did I spend?").is_ok());
    assert!(commands::cmd_chat(&db, "what's the weather?").is_ok());
}

// ========== Utility Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a very long merchant name", 10), "a very ...");
}
