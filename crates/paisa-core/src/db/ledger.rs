//! Signed net cash-flow history
//!
//! The ledger backs the forecast engine. Uploads replace the whole set:
//! a forecast is always computed from the latest complete history, never
//! a mix of old and new uploads.

use chrono::NaiveDate;
use rusqlite::params;
use tracing::debug;

use super::Database;
use crate::error::Result;
use crate::models::LedgerEntry;

impl Database {
    /// Replace the cash-flow history wholesale.
    pub fn replace_ledger(&self, entries: &[LedgerEntry]) -> Result<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        tx.execute("DELETE FROM ledger", [])?;
        for entry in entries {
            tx.execute(
                "INSERT INTO ledger (date, amount, description) VALUES (?, ?, ?)",
                params![entry.date.to_string(), entry.amount, entry.description],
            )?;
        }

        tx.commit()?;
        debug!("Replaced ledger with {} entries", entries.len());
        Ok(())
    }

    /// The full cash-flow history, in insertion order.
    pub fn list_ledger(&self) -> Result<Vec<LedgerEntry>> {
        let conn = self.conn()?;
        let mut stmt =
            conn.prepare("SELECT date, amount, description FROM ledger ORDER BY id")?;

        let rows = stmt.query_map([], |row| {
            let date_str: String = row.get(0)?;
            Ok(LedgerEntry {
                date: NaiveDate::parse_from_str(&date_str, "%Y-%m-%d").unwrap_or_default(),
                amount: row.get(1)?,
                description: row.get(2)?,
            })
        })?;

        Ok(rows.collect::<rusqlite::Result<_>>()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(date: &str, amount: f64) -> LedgerEntry {
        LedgerEntry {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            amount,
            description: String::new(),
        }
    }

    #[test]
    fn test_replace_ledger_is_wholesale() {
        let db = Database::in_memory().unwrap();

        db.replace_ledger(&[entry("2024-01-05", 45000.0), entry("2024-01-20", -12000.0)])
            .unwrap();
        assert_eq!(db.list_ledger().unwrap().len(), 2);

        db.replace_ledger(&[entry("2024-02-05", 45000.0)]).unwrap();
        let entries = db.list_ledger().unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].amount, 45000.0);
        assert_eq!(entries[0].date, NaiveDate::from_ymd_opt(2024, 2, 5).unwrap());
    }
}
