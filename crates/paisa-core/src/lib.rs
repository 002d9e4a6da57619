//! Paisa Core Library
//!
//! Shared functionality for the Paisa personal finance tool:
//! - Best-effort extraction from bank SMS / UPI alerts and CSV exports
//! - Keyword-driven categorization (insights and budgeting taxonomies)
//! - Append-only SQLite transaction store with pooled connections
//! - Spending analytics: month-over-month deltas, recurring charges,
//!   merchant and monthly rollups
//! - Budget gauge with traffic-light thresholds
//! - Balance forecasting with milestones, plus invest-vs-EMI simulation
//! - Rule-based advice over computed results, behind a pluggable trait

pub mod advice;
pub mod analytics;
pub mod budget;
pub mod categorize;
pub mod db;
pub mod error;
pub mod extract;
pub mod forecast;
pub mod ingest;
pub mod models;

pub use advice::{AdviceBackend, AdviceContext, RuleBasedAdvisor};
pub use analytics::{
    CategoryDelta, MerchantTotal, MonthComparison, MonthTotal, PercentChange, RecurringCharge,
    RecurringReport,
};
pub use budget::{Gauge, GaugeStatus};
pub use db::{Database, ImportSummary, TransactionInsertResult, DEFAULT_MONTHLY_LIMIT};
pub use error::{Error, Result};
pub use forecast::{
    EmiOutcome, Forecast, ForecastParams, Horizon, InvestmentOutcome, ScenarioComparison,
    ScenarioInputs,
};
pub use models::{
    BudgetCategory, Category, LedgerEntry, NewTransaction, Transaction, TransactionSource,
};
