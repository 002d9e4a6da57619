//! Question answering command implementation
//!
//! Assembles an advice context from whatever the database can provide
//! (gauge, comparison, recurring charges, forecast) and hands the
//! question to the rule-based advisor.

use std::path::Path;

use anyhow::Result;
use chrono::{Datelike, Utc};
use paisa_core::advice::{AdviceBackend, AdviceContext, RuleBasedAdvisor};
use paisa_core::analytics;
use paisa_core::budget::compute_gauge;
use paisa_core::forecast::{forecast, ForecastParams};

use super::open_db;

pub fn cmd_chat(db_path: &Path, question: &str) -> Result<()> {
    let db = open_db(db_path)?;
    let today = Utc::now().date_naive();

    let month_txs = db.query_month(today.year(), today.month())?;
    let gauge = compute_gauge(&month_txs, db.monthly_limit()?);
    let category_totals = analytics::category_totals(&month_txs);
    let total_spent = gauge.spend;

    let comparison = analytics::month_over_month(&db, today.year(), today.month())?;
    let recurring = analytics::detect_recurring(&db, today, 3, 2)?;

    let history = db.list_ledger()?;
    let fc = if history.is_empty() {
        None
    } else {
        Some(forecast(&history, ForecastParams::default()))
    };

    let ctx = AdviceContext {
        gauge: Some(gauge),
        comparison: Some(comparison),
        recurring: Some(recurring),
        forecast: fc,
        category_totals: Some(category_totals),
        total_spent: Some(total_spent),
    };

    let answer = RuleBasedAdvisor.answer(question, &ctx);

    println!();
    println!("💬 {}", question);
    println!("   {}", answer);

    Ok(())
}
