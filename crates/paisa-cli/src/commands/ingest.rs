//! Alert ingestion and CSV import command implementations

use std::fs::File;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use paisa_core::ingest;
use paisa_core::models::TransactionSource;

use super::open_db;

pub fn cmd_ingest(db_path: &Path, text: &str, received: Option<&str>) -> Result<()> {
    let received = received
        .map(|s| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .context("Invalid --received date format (use YYYY-MM-DD)")
        })
        .transpose()?;

    let db = open_db(db_path)?;
    let tx = ingest::ingest_alert(&db, text, received, TransactionSource::Sms)?;

    println!("✅ Ingested transaction #{}", tx.id);
    println!("   Date:     {}", tx.date);
    println!("   Amount:   ₹{:.2}", tx.amount);
    println!("   Merchant: {}", tx.merchant);
    println!("   Category: {}", tx.category);
    if tx.amount == 0.0 {
        println!("   ⚠️  No amount found in the text; recorded 0.00");
    }

    Ok(())
}

pub fn cmd_import(db_path: &Path, file: &Path) -> Result<()> {
    println!("📥 Importing statement from {}...", file.display());

    let db = open_db(db_path)?;
    let reader = File::open(file)
        .with_context(|| format!("Failed to open {}", file.display()))?;
    let summary = ingest::import_csv(&db, reader)?;

    println!("✅ Import complete");
    println!("   Parsed:     {}", summary.parsed);
    println!("   Inserted:   {}", summary.inserted);
    println!("   Duplicates: {}", summary.duplicates);
    if summary.skipped > 0 {
        println!("   ⚠️  Skipped:  {} (unparsable rows)", summary.skipped);
    }

    Ok(())
}

pub fn cmd_ledger(db_path: &Path, file: &Path) -> Result<()> {
    println!("📥 Uploading cash-flow history from {}...", file.display());

    let db = open_db(db_path)?;
    let reader = File::open(file)
        .with_context(|| format!("Failed to open {}", file.display()))?;
    let count = ingest::import_ledger_csv(&db, reader)?;

    println!("✅ Ledger replaced with {} entries", count);
    println!("   Run `paisa forecast` to project your balance.");

    Ok(())
}
