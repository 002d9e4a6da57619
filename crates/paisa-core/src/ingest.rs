//! Entry points for getting data into the store
//!
//! Three pipelines: single-alert ingestion (SMS / UPI notifications),
//! batch statement import (spend CSV, deduplicated by content hash), and
//! the signed cash-flow ledger upload that backs forecasting.

use std::io::Read;

use chrono::NaiveDate;
use sha2::{Digest, Sha256};
use tracing::{debug, warn};

use crate::categorize::categorize;
use crate::db::{Database, ImportSummary, TransactionInsertResult};
use crate::error::Result;
use crate::extract::{self, CsvRow};
use crate::models::{LedgerEntry, NewTransaction, Transaction, TransactionSource};

/// Fallback merchant label when extraction resolves nothing
const UNKNOWN_MERCHANT: &str = "Unknown";

/// Parse one raw notification, categorize it and append it to the store.
///
/// Always produces a transaction: a missing amount degrades to 0.0 and a
/// missing merchant to "Unknown", keeping the raw text for audit.
pub fn ingest_alert(
    db: &Database,
    text: &str,
    received: Option<NaiveDate>,
    source: TransactionSource,
) -> Result<Transaction> {
    let alert = extract::parse_alert(text, received);

    if alert.amount.is_none() {
        warn!("No amount found in alert text, recording 0.0");
    }

    let category = categorize(alert.merchant.as_deref(), text);
    let new_tx = NewTransaction {
        date: alert.date,
        amount: alert.amount.unwrap_or(0.0),
        merchant: alert
            .merchant
            .unwrap_or_else(|| UNKNOWN_MERCHANT.to_string()),
        category,
        raw_text: alert.raw_text,
        source,
        import_hash: None,
    };

    let id = db.insert_transaction(&new_tx)?;
    db.get_transaction(id)
}

/// Import a spend statement CSV.
///
/// Rows with an unparsable date or amount are skipped with a warning and
/// counted in the summary; they never abort the batch. Each kept row gets
/// a content hash so re-importing the same export reports duplicates
/// instead of double-counting.
pub fn import_csv<R: Read>(db: &Database, reader: R) -> Result<ImportSummary> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut summary = ImportSummary::default();

    for row in csv_reader.deserialize::<CsvRow>() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                warn!("Skipping malformed CSV row: {}", e);
                summary.skipped += 1;
                continue;
            }
        };
        summary.parsed += 1;

        let Some(date) = extract::parse_date_cell(&row.date) else {
            warn!(date = %row.date, "Skipping row with unparsable date");
            summary.skipped += 1;
            continue;
        };
        let Some(amount) = extract::parse_amount_cell(&row.amount) else {
            warn!(amount = %row.amount, "Skipping row with unparsable amount");
            summary.skipped += 1;
            continue;
        };

        let merchant = extract::extract_merchant(&row.description)
            .unwrap_or_else(|| first_word_or_unknown(&row.description));
        let category = categorize(Some(&merchant), &row.description);

        let new_tx = NewTransaction {
            date,
            // Statement rows can carry negatives (refunds); the store
            // holds spend magnitudes only
            amount: amount.abs(),
            merchant,
            category,
            raw_text: row.description.clone(),
            source: TransactionSource::Csv,
            import_hash: Some(import_hash(&row)),
        };

        match db.insert_deduped(&new_tx)? {
            TransactionInsertResult::Inserted(_) => summary.inserted += 1,
            TransactionInsertResult::Duplicate(_) => summary.duplicates += 1,
        }
    }

    debug!(
        parsed = summary.parsed,
        inserted = summary.inserted,
        duplicates = summary.duplicates,
        skipped = summary.skipped,
        "Statement import finished"
    );
    Ok(summary)
}

/// Import a signed cash-flow history CSV, replacing the stored ledger.
///
/// Amounts keep their sign here (income positive, spend negative); rows
/// that fail to parse are skipped with a warning.
pub fn import_ledger_csv<R: Read>(db: &Database, reader: R) -> Result<usize> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut entries = Vec::new();
    for row in csv_reader.deserialize::<CsvRow>() {
        let row = match row {
            Ok(row) => row,
            Err(e) => {
                warn!("Skipping malformed ledger row: {}", e);
                continue;
            }
        };
        let (Some(date), Some(amount)) = (
            extract::parse_date_cell(&row.date),
            extract::parse_amount_cell(&row.amount),
        ) else {
            warn!(date = %row.date, amount = %row.amount, "Skipping unparsable ledger row");
            continue;
        };
        entries.push(LedgerEntry {
            date,
            amount,
            description: row.description,
        });
    }

    db.replace_ledger(&entries)?;
    Ok(entries.len())
}

/// Content hash of the fields that identify a statement row.
///
/// Deliberately excludes anything derived (merchant, category) so a
/// categorizer change never resurrects old rows as "new".
fn import_hash(row: &CsvRow) -> String {
    let mut hasher = Sha256::new();
    hasher.update(row.date.as_bytes());
    hasher.update(b"|");
    hasher.update(row.amount.as_bytes());
    hasher.update(b"|");
    hasher.update(row.description.as_bytes());
    hex::encode(hasher.finalize())
}

fn first_word_or_unknown(description: &str) -> String {
    description
        .split_whitespace()
        .next()
        .map(|w| w.to_string())
        .unwrap_or_else(|| UNKNOWN_MERCHANT.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Category;

    #[test]
    fn test_ingest_alert_full_pipeline() {
        let db = Database::in_memory().unwrap();
        let received = NaiveDate::from_ymd_opt(2024, 9, 26).unwrap();

        let tx = ingest_alert(
            &db,
            "ICICI Bank: Rs 500 spent at Uber on 25-Sep",
            Some(received),
            TransactionSource::Sms,
        )
        .unwrap();

        assert_eq!(tx.amount, 500.0);
        assert_eq!(tx.merchant, "Uber");
        assert_eq!(tx.category, Category::Travel);
        assert_eq!(tx.date, NaiveDate::from_ymd_opt(2024, 9, 25).unwrap());
        assert_eq!(tx.source, TransactionSource::Sms);
        assert_eq!(db.count_transactions().unwrap(), 1);
    }

    #[test]
    fn test_ingest_alert_degrades_missing_fields() {
        let db = Database::in_memory().unwrap();
        let received = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();

        let tx = ingest_alert(&db, "txn alert xyz", Some(received), TransactionSource::Sms)
            .unwrap();

        assert_eq!(tx.amount, 0.0);
        assert_eq!(tx.merchant, "Unknown");
        assert_eq!(tx.category, Category::Other);
        assert_eq!(tx.date, received);
        assert_eq!(tx.raw_text, "txn alert xyz");
    }

    #[test]
    fn test_import_csv_round_trip() {
        let db = Database::in_memory().unwrap();
        let csv = "Date,Amount,Description\n2024-01-05,299.50,Zomato order\n";

        let summary = import_csv(&db, csv.as_bytes()).unwrap();
        assert_eq!(summary.parsed, 1);
        assert_eq!(summary.inserted, 1);

        let txs = db.all_transactions().unwrap();
        assert_eq!(txs.len(), 1);
        assert_eq!(txs[0].amount, 299.5);
        assert_eq!(txs[0].category, Category::Food);
        assert!(txs[0].merchant.contains("Zomato"));
        assert_eq!(txs[0].source, TransactionSource::Csv);
    }

    #[test]
    fn test_import_csv_skips_bad_rows() {
        let db = Database::in_memory().unwrap();
        let csv = "Date,Amount,Description\n\
                   2024-01-05,299.50,Zomato order\n\
                   not-a-date,100.00,Broken row\n\
                   2024-01-06,not-a-number,Broken too\n";

        let summary = import_csv(&db, csv.as_bytes()).unwrap();
        assert_eq!(summary.parsed, 3);
        assert_eq!(summary.inserted, 1);
        assert_eq!(summary.skipped, 2);
        assert_eq!(db.count_transactions().unwrap(), 1);
    }

    #[test]
    fn test_import_csv_reimport_reports_duplicates() {
        let db = Database::in_memory().unwrap();
        let csv = "Date,Amount,Description\n\
                   2024-01-05,299.50,Zomato order\n\
                   2024-01-06,120.00,Uber trip\n";

        let first = import_csv(&db, csv.as_bytes()).unwrap();
        assert_eq!(first.inserted, 2);

        let second = import_csv(&db, csv.as_bytes()).unwrap();
        assert_eq!(second.inserted, 0);
        assert_eq!(second.duplicates, 2);
        assert_eq!(db.count_transactions().unwrap(), 2);
    }

    #[test]
    fn test_import_csv_negative_amounts_stored_as_magnitude() {
        let db = Database::in_memory().unwrap();
        let csv = "Date,Amount,Description\n2024-01-05,(100.00),Refund at Amazon\n";

        import_csv(&db, csv.as_bytes()).unwrap();
        let txs = db.all_transactions().unwrap();
        assert_eq!(txs[0].amount, 100.0);
    }

    #[test]
    fn test_import_ledger_csv_keeps_sign() {
        let db = Database::in_memory().unwrap();
        let csv = "Date,Amount,Description\n\
                   2024-01-01,45000.00,Salary\n\
                   2024-01-15,(12000.00),Rent\n";

        let count = import_ledger_csv(&db, csv.as_bytes()).unwrap();
        assert_eq!(count, 2);

        let entries = db.list_ledger().unwrap();
        assert_eq!(entries[0].amount, 45_000.0);
        assert_eq!(entries[1].amount, -12_000.0);
    }
}
