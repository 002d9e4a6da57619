//! Report command implementations

use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;
use chrono::{Datelike, Utc};
use paisa_core::analytics::{self, PercentChange};
use paisa_core::budget::compute_gauge;
use paisa_core::categorize::budget_category;
use paisa_core::models::BudgetCategory;

use super::{open_db, truncate};

pub fn cmd_gauge(db_path: &Path, json: bool) -> Result<()> {
    let db = open_db(db_path)?;
    let today = Utc::now().date_naive();

    let transactions = db.query_month(today.year(), today.month())?;
    let gauge = compute_gauge(&transactions, db.monthly_limit()?);

    if json {
        println!("{}", serde_json::to_string_pretty(&gauge)?);
        return Ok(());
    }

    let icon = match gauge.status {
        paisa_core::GaugeStatus::Green => "🟢",
        paisa_core::GaugeStatus::Orange => "🟠",
        paisa_core::GaugeStatus::Red => "🔴",
    };

    println!();
    println!("{} Budget Gauge - {}-{:02}", icon, today.year(), today.month());
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Spent: ₹{:.2} of ₹{:.0} ({}%)", gauge.spend, gauge.limit, gauge.percent);
    if gauge.limit_clamped {
        println!("   ⚠️  Configured limit was not positive; treated as ₹1");
    }

    // Per budget-category breakdown
    let mut by_budget: HashMap<BudgetCategory, f64> = HashMap::new();
    for tx in &transactions {
        *by_budget.entry(budget_category(&tx.merchant)).or_insert(0.0) += tx.amount;
    }
    if !by_budget.is_empty() {
        let mut rows: Vec<_> = by_budget.into_iter().collect();
        rows.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        println!();
        for (category, amount) in rows {
            println!("   {:15} ₹{:>10.2}", category.as_str(), amount);
        }
    }

    Ok(())
}

pub fn cmd_compare(db_path: &Path, year: Option<i32>, month: Option<u32>, json: bool) -> Result<()> {
    let db = open_db(db_path)?;
    let today = Utc::now().date_naive();
    let year = year.unwrap_or_else(|| today.year());
    let month = month.unwrap_or_else(|| today.month());

    let cmp = analytics::month_over_month(&db, year, month)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&cmp)?);
        return Ok(());
    }

    println!();
    println!("📊 Month over Month - {}-{:02}", cmp.year, cmp.month);
    println!("   ─────────────────────────────────────────────────────────────");

    if cmp.per_category.is_empty() {
        println!("   No spending recorded in this month or the previous one.");
        return Ok(());
    }

    println!(
        "   {:15} │ {:>10} │ {:>10} │ {:>10}",
        "Category", "Previous", "Current", "Change"
    );
    let mut rows: Vec<_> = cmp.per_category.iter().collect();
    rows.sort_by(|a, b| {
        b.1.current
            .partial_cmp(&a.1.current)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
    for (category, delta) in rows {
        println!(
            "   {:15} │ {:>10.2} │ {:>10.2} │ {:>10}",
            category.as_str(),
            delta.previous,
            delta.current,
            fmt_change(delta.change)
        );
    }

    println!();
    println!(
        "   Total: ₹{:.2} → ₹{:.2} ({})",
        cmp.total_previous,
        cmp.total_current,
        fmt_change(cmp.total_change)
    );

    Ok(())
}

pub fn cmd_recurring(db_path: &Path, months: u32, min: usize, json: bool) -> Result<()> {
    let db = open_db(db_path)?;
    let today = Utc::now().date_naive();

    let report = analytics::detect_recurring(&db, today, months, min)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!();
    println!(
        "🔁 Recurring Charges (last {} months, {}+ occurrences)",
        report.lookback_months, report.min_occurrences
    );
    println!("   ─────────────────────────────────────────────────────────────");

    if report.recurring.is_empty() {
        println!("   No recurring charges detected.");
        return Ok(());
    }

    for charge in &report.recurring {
        println!(
            "   {:20} {}x  avg ₹{:>9.2}  total ₹{:>10.2}",
            truncate(&charge.merchant, 20),
            charge.count,
            charge.avg_amount,
            charge.total
        );
        println!("      💡 {}", charge.suggestion);
    }

    Ok(())
}

pub fn cmd_merchants(db_path: &Path, limit: usize, json: bool) -> Result<()> {
    let db = open_db(db_path)?;
    let transactions = db.all_transactions()?;
    let top = analytics::top_merchants(&transactions, limit);

    if json {
        println!("{}", serde_json::to_string_pretty(&top)?);
        return Ok(());
    }

    println!();
    println!("🏪 Top Merchants");
    println!("   ─────────────────────────────────────────────────────────────");

    if top.is_empty() {
        println!("   No transactions yet.");
        return Ok(());
    }

    for (i, m) in top.iter().enumerate() {
        println!(
            "   {:2}. {:25} ₹{:>10.2}  ({} txns)",
            i + 1,
            truncate(&m.merchant, 25),
            m.total,
            m.count
        );
    }

    Ok(())
}

pub fn cmd_trends(db_path: &Path, json: bool) -> Result<()> {
    let db = open_db(db_path)?;
    let transactions = db.all_transactions()?;
    let breakdown = analytics::monthly_breakdown(&transactions);

    if json {
        println!("{}", serde_json::to_string_pretty(&breakdown)?);
        return Ok(());
    }

    println!();
    println!("📈 Monthly Spending");
    println!("   ─────────────────────────────────────────────────────────────");

    if breakdown.is_empty() {
        println!("   No transactions yet.");
        return Ok(());
    }

    let max = breakdown
        .iter()
        .map(|m| m.total)
        .fold(0.0_f64, f64::max)
        .max(1.0);
    for month in &breakdown {
        let bar_len = ((month.total / max) * 40.0).round() as usize;
        println!(
            "   {}-{:02}  {:40}  ₹{:.2}",
            month.year,
            month.month,
            "█".repeat(bar_len),
            month.total
        );
    }

    Ok(())
}

fn fmt_change(change: PercentChange) -> String {
    match change {
        PercentChange::Change(pct) => format!("{:+.1}%", pct),
        PercentChange::NewSpending => "new".to_string(),
    }
}
