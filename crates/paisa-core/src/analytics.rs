//! Aggregation over transaction sets
//!
//! Every operation here is a pure read computed fresh per query: category
//! totals, month-over-month comparison, recurring-merchant detection, and
//! merchant / monthly rollups. Nothing is cached.

use chrono::{Datelike, Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::warn;

use crate::db::Database;
use crate::error::Result;
use crate::models::{Category, Transaction};

/// Relative change between two period totals.
///
/// `NewSpending` is the infinite-increase sentinel for a category that had
/// nothing in the previous period; the presentation layer renders it
/// distinctly ("new spending"), never as a numeric percentage.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "percent", rename_all = "snake_case")]
pub enum PercentChange {
    Change(f64),
    NewSpending,
}

/// Per-category line in a month-over-month comparison
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryDelta {
    pub previous: f64,
    pub current: f64,
    pub change: PercentChange,
}

/// Month-over-month comparison result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthComparison {
    pub year: i32,
    pub month: u32,
    pub per_category: HashMap<Category, CategoryDelta>,
    pub total_previous: f64,
    pub total_current: f64,
    pub total_change: PercentChange,
}

/// A merchant flagged as a likely subscription
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringCharge {
    pub merchant: String,
    pub count: usize,
    pub avg_amount: f64,
    pub total: f64,
    /// One-line review proposal with the average monthly cost
    pub suggestion: String,
}

/// Recurring-subscription detection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecurringReport {
    pub lookback_months: u32,
    pub min_occurrences: usize,
    pub recurring: Vec<RecurringCharge>,
}

/// One merchant's spending rollup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MerchantTotal {
    pub merchant: String,
    pub total: f64,
    pub count: usize,
}

/// One calendar month's spending rollup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthTotal {
    pub year: i32,
    pub month: u32,
    pub total: f64,
}

/// Sum amounts per category. Values always sum exactly to the sum of all
/// transaction amounts - no double-counting or loss.
pub fn category_totals(transactions: &[Transaction]) -> HashMap<Category, f64> {
    let mut totals: HashMap<Category, f64> = HashMap::new();
    for tx in transactions {
        *totals.entry(tx.category).or_insert(0.0) += tx.amount;
    }
    totals
}

/// Percentage change from `previous` to `current`.
///
/// Defined totally: (0, 0) is a 0% change and (0, x>0) is the
/// `NewSpending` sentinel rather than a division error.
pub fn percent_change(previous: f64, current: f64) -> PercentChange {
    if previous == 0.0 {
        if current == 0.0 {
            return PercentChange::Change(0.0);
        }
        return PercentChange::NewSpending;
    }
    PercentChange::Change((current - previous) / previous * 100.0)
}

/// Compare a month's per-category spending against the previous month.
///
/// The category key sets of both months are unioned, so a category present
/// in only one month still reports, with the other side at zero. Months
/// with no data yield an all-zero comparison, never an error.
pub fn month_over_month(db: &Database, year: i32, month: u32) -> Result<MonthComparison> {
    let current = db.query_month(year, month)?;

    let first_of_month = NaiveDate::from_ymd_opt(year, month, 1).ok_or_else(|| {
        crate::error::Error::InvalidData(format!("Invalid month: {}-{}", year, month))
    })?;
    let prev_month_start = first_of_month
        .checked_sub_months(Months::new(1))
        .expect("month subtraction from a valid date");
    let previous = db.query_month(prev_month_start.year(), prev_month_start.month())?;

    let cur_totals = category_totals(&current);
    let prev_totals = category_totals(&previous);

    let mut per_category = HashMap::new();
    for category in cur_totals.keys().chain(prev_totals.keys()) {
        let prev_amt = prev_totals.get(category).copied().unwrap_or(0.0);
        let cur_amt = cur_totals.get(category).copied().unwrap_or(0.0);
        per_category.insert(
            *category,
            CategoryDelta {
                previous: prev_amt,
                current: cur_amt,
                change: percent_change(prev_amt, cur_amt),
            },
        );
    }

    let total_previous: f64 = prev_totals.values().sum();
    let total_current: f64 = cur_totals.values().sum();

    Ok(MonthComparison {
        year,
        month,
        per_category,
        total_previous,
        total_current,
        total_change: percent_change(total_previous, total_current),
    })
}

/// Detect merchants charged repeatedly within a trailing window.
///
/// Groups the window's transactions by merchant preserving first-seen
/// order; a merchant qualifies when its occurrence count meets the
/// minimum. Results sort descending by average amount, with ties keeping
/// grouping order (stable sort). Zero lookback or minimum clamps to 1
/// with a warning rather than raising.
pub fn detect_recurring(
    db: &Database,
    today: NaiveDate,
    lookback_months: u32,
    min_occurrences: usize,
) -> Result<RecurringReport> {
    let lookback_months = if lookback_months == 0 {
        warn!("Lookback of 0 months clamped to 1");
        1
    } else {
        lookback_months
    };
    let min_occurrences = if min_occurrences == 0 {
        warn!("Minimum occurrences of 0 clamped to 1");
        1
    } else {
        min_occurrences
    };

    let start = today
        .checked_sub_months(Months::new(lookback_months))
        .unwrap_or(NaiveDate::MIN);
    let end = today.checked_add_days(Days::new(1)).unwrap_or(NaiveDate::MAX);
    let transactions = db.query_range(start, end)?;

    // Group by merchant, preserving first-seen order for tie-breaking
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<f64>> = HashMap::new();
    for tx in &transactions {
        let merchant = if tx.merchant.is_empty() {
            "Unknown".to_string()
        } else {
            tx.merchant.clone()
        };
        groups
            .entry(merchant.clone())
            .or_insert_with(|| {
                order.push(merchant.clone());
                Vec::new()
            })
            .push(tx.amount);
    }

    let mut recurring: Vec<RecurringCharge> = Vec::new();
    for merchant in order {
        let amounts = &groups[&merchant];
        if amounts.len() < min_occurrences {
            continue;
        }
        let total: f64 = amounts.iter().sum();
        let avg = round2(total / amounts.len() as f64);
        recurring.push(RecurringCharge {
            suggestion: format!(
                "Review subscription from {}. Potential monthly save: ₹{}",
                merchant, avg
            ),
            merchant,
            count: amounts.len(),
            avg_amount: avg,
            total: round2(total),
        });
    }

    recurring.sort_by(|a, b| {
        b.avg_amount
            .partial_cmp(&a.avg_amount)
            .unwrap_or(std::cmp::Ordering::Equal)
    });

    Ok(RecurringReport {
        lookback_months,
        min_occurrences,
        recurring,
    })
}

/// Top-N merchants by total spend, descending.
pub fn top_merchants(transactions: &[Transaction], n: usize) -> Vec<MerchantTotal> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, (f64, usize)> = HashMap::new();
    for tx in transactions {
        let entry = groups.entry(tx.merchant.clone()).or_insert_with(|| {
            order.push(tx.merchant.clone());
            (0.0, 0)
        });
        entry.0 += tx.amount;
        entry.1 += 1;
    }

    let mut totals: Vec<MerchantTotal> = order
        .into_iter()
        .map(|merchant| {
            let (total, count) = groups[&merchant];
            MerchantTotal {
                merchant,
                total,
                count,
            }
        })
        .collect();

    totals.sort_by(|a, b| {
        b.total
            .partial_cmp(&a.total)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    totals.truncate(n);
    totals
}

/// Total spend per calendar month, ascending by month.
pub fn monthly_breakdown(transactions: &[Transaction]) -> Vec<MonthTotal> {
    let mut months: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for tx in transactions {
        *months.entry((tx.date.year(), tx.date.month())).or_insert(0.0) += tx.amount;
    }

    months
        .into_iter()
        .map(|((year, month), total)| MonthTotal { year, month, total })
        .collect()
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}
