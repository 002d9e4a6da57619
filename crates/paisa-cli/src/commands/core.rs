//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `cmd_init` - Initialize the database
//! - `cmd_status` - Show database status and record counts
//! - `cmd_set_limit` - Set the monthly budget limit

use std::path::Path;

use anyhow::{Context, Result};
use paisa_core::{Database, DEFAULT_MONTHLY_LIMIT};

/// Open the database, running migrations if needed
pub fn open_db(db_path: &Path) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path is not valid UTF-8")?;
    Database::new(path_str).context("Failed to open database")
}

pub fn cmd_init(db_path: &Path) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let db = open_db(db_path)?;
    println!("   Monthly limit: ₹{:.0} (default)", db.monthly_limit()?);

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Ingest an alert:      paisa ingest --text \"Rs 500 spent at Uber\"");
    println!("  2. Import a statement:   paisa import --file statement.csv");
    println!("  3. Check your budget:    paisa gauge");

    Ok(())
}

pub fn cmd_status(db_path: &Path) -> Result<()> {
    use std::fs;

    println!();
    println!("📊 Paisa Status");
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Database: {}", db_path.display());

    if db_path.exists() {
        if let Ok(metadata) = fs::metadata(db_path) {
            let size_kb = metadata.len() as f64 / 1024.0;
            if size_kb < 1024.0 {
                println!("   Size: {:.1} KB", size_kb);
            } else {
                println!("   Size: {:.1} MB", size_kb / 1024.0);
            }
        }
    } else {
        println!("   Size: (database not initialized)");
    }

    let db = open_db(db_path)?;
    let limit = db.monthly_limit()?;

    println!();
    println!("   Transactions: {}", db.count_transactions()?);
    println!("   Ledger entries: {}", db.list_ledger()?.len());
    if limit == DEFAULT_MONTHLY_LIMIT {
        println!("   Monthly limit: ₹{:.0} (default)", limit);
    } else {
        println!("   Monthly limit: ₹{:.0}", limit);
    }

    Ok(())
}

pub fn cmd_set_limit(db_path: &Path, amount: f64) -> Result<()> {
    anyhow::ensure!(amount > 0.0, "Limit must be positive (got {})", amount);

    let db = open_db(db_path)?;
    db.set_monthly_limit(amount)
        .context("Failed to save monthly limit")?;

    println!("✅ Monthly limit set to ₹{:.0}", amount);
    Ok(())
}
