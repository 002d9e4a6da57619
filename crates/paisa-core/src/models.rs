//! Domain models for paisa

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Spending category used by the insights pipeline.
///
/// This taxonomy is keyword-driven (see [`crate::categorize`]) and every
/// transaction resolves to exactly one value, falling back to `Other`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Food,
    Travel,
    Bills,
    Groceries,
    Subscriptions,
    Shopping,
    Healthcare,
    Other,
}

impl Category {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Food => "Food",
            Self::Travel => "Travel",
            Self::Bills => "Bills",
            Self::Groceries => "Groceries",
            Self::Subscriptions => "Subscriptions",
            Self::Shopping => "Shopping",
            Self::Healthcare => "Healthcare",
            Self::Other => "Other",
        }
    }
}

impl std::str::FromStr for Category {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "food" => Ok(Self::Food),
            "travel" => Ok(Self::Travel),
            "bills" => Ok(Self::Bills),
            "groceries" => Ok(Self::Groceries),
            "subscriptions" => Ok(Self::Subscriptions),
            "shopping" => Ok(Self::Shopping),
            "healthcare" => Ok(Self::Healthcare),
            "other" => Ok(Self::Other),
            _ => Err(format!("Unknown category: {}", s)),
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Budgeting category, the coarser taxonomy used by the gauge subsystem.
///
/// Parallel to [`Category`] rather than unified with it: the two feed
/// different aggregations and keep their own keyword tables.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BudgetCategory {
    #[serde(rename = "Food & Dining")]
    FoodAndDining,
    Transportation,
    Shopping,
    Entertainment,
    Utilities,
    Healthcare,
    Others,
}

impl BudgetCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::FoodAndDining => "Food & Dining",
            Self::Transportation => "Transportation",
            Self::Shopping => "Shopping",
            Self::Entertainment => "Entertainment",
            Self::Utilities => "Utilities",
            Self::Healthcare => "Healthcare",
            Self::Others => "Others",
        }
    }
}

impl std::fmt::Display for BudgetCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Transaction provenance - how the record entered the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TransactionSource {
    /// Parsed from a bank SMS / UPI notification
    #[default]
    Sms,
    /// Imported from a bank CSV export
    Csv,
    /// Manually entered
    Manual,
    /// Pushed by an external webhook
    Webhook,
}

impl TransactionSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Sms => "sms",
            Self::Csv => "csv",
            Self::Manual => "manual",
            Self::Webhook => "webhook",
        }
    }
}

impl std::str::FromStr for TransactionSource {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "sms" => Ok(Self::Sms),
            "csv" => Ok(Self::Csv),
            "manual" => Ok(Self::Manual),
            "webhook" => Ok(Self::Webhook),
            _ => Err(format!("Unknown transaction source: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A normalized spending transaction.
///
/// Immutable once created; the store assigns identity. `amount` is a
/// non-negative spend magnitude - credits never appear here (the signed
/// cash-flow history used by forecasting is [`LedgerEntry`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub date: NaiveDate,
    /// Spend magnitude, always >= 0
    pub amount: f64,
    /// Merchant label; "Unknown" when extraction could not resolve one
    pub merchant: String,
    pub category: Category,
    /// Original source text, retained for audit
    pub raw_text: String,
    pub source: TransactionSource,
    pub created_at: DateTime<Utc>,
}

/// A transaction ready for insertion (before the store assigns an id)
#[derive(Debug, Clone)]
pub struct NewTransaction {
    pub date: NaiveDate,
    pub amount: f64,
    pub merchant: String,
    pub category: Category,
    pub raw_text: String,
    pub source: TransactionSource,
    /// Hash for statement-import deduplication; None for alert ingestion
    pub import_hash: Option<String>,
}

/// One row of signed net cash flow history (income positive, spend
/// negative). Input to the forecast engine only; deliberately a separate
/// type from [`Transaction`] so the two sign conventions cannot mix.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LedgerEntry {
    pub date: NaiveDate,
    pub amount: f64,
    pub description: String,
}
