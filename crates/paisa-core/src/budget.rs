//! Budget gauge: percent-of-limit consumed with traffic-light status

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::Transaction;

pub use crate::db::DEFAULT_MONTHLY_LIMIT;

/// Traffic-light budget status.
///
/// Thresholds are a contract: green below 70%, orange below 90%, red from
/// 90% up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GaugeStatus {
    Green,
    Orange,
    Red,
}

impl GaugeStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Green => "green",
            Self::Orange => "orange",
            Self::Red => "red",
        }
    }
}

impl std::fmt::Display for GaugeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Percent-of-limit gauge result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gauge {
    /// Rounded percent of the limit consumed, capped at 100 for display
    /// even when actually over budget
    pub percent: u8,
    pub spend: f64,
    pub limit: f64,
    /// True when a non-positive configured limit was clamped to 1
    pub limit_clamped: bool,
    pub status: GaugeStatus,
}

/// Compute the gauge for a transaction set against a monthly limit.
///
/// A zero or negative limit is clamped to 1 so the ratio stays defined -
/// a configuration problem, surfaced via `limit_clamped` and a warning,
/// never a crash.
pub fn compute_gauge(transactions: &[Transaction], monthly_limit: f64) -> Gauge {
    let spend: f64 = transactions.iter().map(|t| t.amount).sum();

    let limit_clamped = monthly_limit <= 0.0;
    let limit = if limit_clamped {
        warn!(monthly_limit, "Non-positive monthly limit clamped to 1");
        1.0
    } else {
        monthly_limit
    };

    let percent = (100.0 * spend / limit).round().min(100.0) as u8;
    let status = if percent < 70 {
        GaugeStatus::Green
    } else if percent < 90 {
        GaugeStatus::Orange
    } else {
        GaugeStatus::Red
    };

    Gauge {
        percent,
        spend,
        limit,
        limit_clamped,
        status,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Category, TransactionSource};
    use chrono::{NaiveDate, Utc};

    fn txs(amounts: &[f64]) -> Vec<Transaction> {
        amounts
            .iter()
            .map(|&amount| Transaction {
                id: 0,
                date: NaiveDate::from_ymd_opt(2024, 1, 15).unwrap(),
                amount,
                merchant: "M".to_string(),
                category: Category::Other,
                raw_text: String::new(),
                source: TransactionSource::Manual,
                created_at: Utc::now(),
            })
            .collect()
    }

    #[test]
    fn test_gauge_green() {
        let gauge = compute_gauge(&txs(&[1900.0]), 5000.0);
        assert_eq!(gauge.percent, 38);
        assert_eq!(gauge.status, GaugeStatus::Green);
        assert!(!gauge.limit_clamped);
    }

    #[test]
    fn test_gauge_orange() {
        let gauge = compute_gauge(&txs(&[4200.0]), 5000.0);
        assert_eq!(gauge.percent, 84);
        assert_eq!(gauge.status, GaugeStatus::Orange);
    }

    #[test]
    fn test_gauge_red_capped_at_100() {
        // Over budget: percent is capped for display, not 104
        let gauge = compute_gauge(&txs(&[5200.0]), 5000.0);
        assert_eq!(gauge.percent, 100);
        assert_eq!(gauge.status, GaugeStatus::Red);
        assert_eq!(gauge.spend, 5200.0);
    }

    #[test]
    fn test_gauge_threshold_boundaries() {
        // 70% is orange, 69% is green
        assert_eq!(compute_gauge(&txs(&[3500.0]), 5000.0).status, GaugeStatus::Orange);
        assert_eq!(compute_gauge(&txs(&[3450.0]), 5000.0).status, GaugeStatus::Green);
        // 90% is red, 89% is orange
        assert_eq!(compute_gauge(&txs(&[4500.0]), 5000.0).status, GaugeStatus::Red);
        assert_eq!(compute_gauge(&txs(&[4450.0]), 5000.0).status, GaugeStatus::Orange);
    }

    #[test]
    fn test_gauge_zero_limit_clamps() {
        let gauge = compute_gauge(&txs(&[500.0]), 0.0);
        assert!(gauge.limit_clamped);
        assert_eq!(gauge.limit, 1.0);
        assert_eq!(gauge.percent, 100);
        assert_eq!(gauge.status, GaugeStatus::Red);
    }

    #[test]
    fn test_gauge_empty_transactions() {
        let gauge = compute_gauge(&[], 5000.0);
        assert_eq!(gauge.percent, 0);
        assert_eq!(gauge.status, GaugeStatus::Green);
    }
}
