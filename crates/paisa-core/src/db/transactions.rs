//! Transaction store operations
//!
//! The store is append-only: no update or delete. A category correction,
//! if ever needed, is a superseding insert by the caller.

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension, Row};
use tracing::debug;

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{NewTransaction, Transaction};

/// Result of inserting a statement transaction
#[derive(Debug, Clone)]
pub enum TransactionInsertResult {
    /// Transaction was inserted, contains the new transaction id
    Inserted(i64),
    /// Transaction was a duplicate, contains the existing transaction id
    Duplicate(i64),
}

/// Outcome of a batch statement import
#[derive(Debug, Clone, Default)]
pub struct ImportSummary {
    pub parsed: usize,
    pub inserted: usize,
    pub duplicates: usize,
    pub skipped: usize,
}

fn row_to_transaction(row: &Row<'_>) -> rusqlite::Result<Transaction> {
    let date_str: String = row.get(1)?;
    let category_str: String = row.get(4)?;
    let source_str: String = row.get(6)?;
    let created_str: String = row.get(7)?;

    Ok(Transaction {
        id: row.get(0)?,
        date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").unwrap_or_default(),
        amount: row.get(2)?,
        merchant: row.get(3)?,
        category: category_str.parse().unwrap_or(crate::models::Category::Other),
        raw_text: row.get(5)?,
        source: source_str.parse().unwrap_or_default(),
        created_at: parse_datetime(&created_str),
    })
}

const SELECT_COLUMNS: &str =
    "id, date, amount, merchant, category, raw_text, source, created_at";

impl Database {
    /// Append a transaction, returning the store-assigned id.
    pub fn insert_transaction(&self, tx: &NewTransaction) -> Result<i64> {
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO transactions (date, amount, merchant, category, raw_text, source, import_hash)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
            params![
                tx.date.to_string(),
                tx.amount,
                tx.merchant,
                tx.category.as_str(),
                tx.raw_text,
                tx.source.as_str(),
                tx.import_hash,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Insert a statement transaction, skipping duplicates by import hash.
    ///
    /// Re-importing the same statement export must not double-count, so
    /// rows whose hash already exists report the existing id instead.
    pub fn insert_deduped(&self, tx: &NewTransaction) -> Result<TransactionInsertResult> {
        let hash = tx
            .import_hash
            .as_deref()
            .ok_or_else(|| Error::Import("Statement rows require an import hash".into()))?;

        let conn = self.conn()?;
        let existing: Option<i64> = conn
            .query_row(
                "SELECT id FROM transactions WHERE import_hash = ?",
                params![hash],
                |row| row.get(0),
            )
            .optional()?;

        if let Some(existing_id) = existing {
            return Ok(TransactionInsertResult::Duplicate(existing_id));
        }

        Ok(TransactionInsertResult::Inserted(
            self.insert_transaction(tx)?,
        ))
    }

    /// Fetch one transaction by id
    pub fn get_transaction(&self, id: i64) -> Result<Transaction> {
        let conn = self.conn()?;
        conn.query_row(
            &format!("SELECT {} FROM transactions WHERE id = ?", SELECT_COLUMNS),
            params![id],
            row_to_transaction,
        )
        .optional()?
        .ok_or_else(|| Error::NotFound(format!("Transaction {}", id)))
    }

    /// Transactions with `start <= date < end`, in insertion order.
    pub fn query_range(&self, start: NaiveDate, end: NaiveDate) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM transactions WHERE date >= ? AND date < ? ORDER BY id",
            SELECT_COLUMNS
        ))?;

        let rows = stmt.query_map(
            params![start.to_string(), end.to_string()],
            row_to_transaction,
        )?;

        let transactions: Vec<Transaction> = rows.collect::<rusqlite::Result<_>>()?;
        debug!(
            "Queried {} transactions in [{}, {})",
            transactions.len(),
            start,
            end
        );
        Ok(transactions)
    }

    /// Transactions in one calendar month.
    ///
    /// Sugar for the month's exclusive date range; December rolls over to
    /// January of the next year.
    pub fn query_month(&self, year: i32, month: u32) -> Result<Vec<Transaction>> {
        let start = NaiveDate::from_ymd_opt(year, month, 1)
            .ok_or_else(|| Error::InvalidData(format!("Invalid month: {}-{}", year, month)))?;
        let end = if month == 12 {
            NaiveDate::from_ymd_opt(year + 1, 1, 1)
        } else {
            NaiveDate::from_ymd_opt(year, month + 1, 1)
        }
        .expect("first of month is always valid");

        self.query_range(start, end)
    }

    /// All transactions, in insertion order.
    pub fn all_transactions(&self) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(&format!(
            "SELECT {} FROM transactions ORDER BY id",
            SELECT_COLUMNS
        ))?;
        let rows = stmt.query_map([], row_to_transaction)?;
        Ok(rows.collect::<rusqlite::Result<_>>()?)
    }

    /// Total number of stored transactions
    pub fn count_transactions(&self) -> Result<i64> {
        let conn = self.conn()?;
        Ok(conn.query_row("SELECT COUNT(*) FROM transactions", [], |row| row.get(0))?)
    }
}
