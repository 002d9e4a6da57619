//! Question answering over computed analytics
//!
//! `AdviceBackend` is the seam: the built-in [`RuleBasedAdvisor`] matches
//! keyword intents and renders templated sentences from whatever
//! snapshots the caller put in the context. A model-backed advisor would
//! implement the same trait; none ships here.

use std::collections::HashMap;

use crate::analytics::{MonthComparison, PercentChange, RecurringReport};
use crate::budget::Gauge;
use crate::forecast::{Forecast, Horizon};
use crate::models::Category;

/// Snapshots available to an advisor. All optional: the advisor answers
/// from what is present and says so when the data it needs is missing.
#[derive(Debug, Clone, Default)]
pub struct AdviceContext {
    pub gauge: Option<Gauge>,
    pub comparison: Option<MonthComparison>,
    pub recurring: Option<RecurringReport>,
    pub forecast: Option<Forecast>,
    pub category_totals: Option<HashMap<Category, f64>>,
    pub total_spent: Option<f64>,
}

/// Answer free-form questions against an [`AdviceContext`]
pub trait AdviceBackend {
    fn answer(&self, question: &str, ctx: &AdviceContext) -> String;
}

/// Keyword-matching advisor. Intents are checked in a fixed order so a
/// question hitting several keywords gets a deterministic answer.
#[derive(Debug, Default, Clone, Copy)]
pub struct RuleBasedAdvisor;

impl AdviceBackend for RuleBasedAdvisor {
    fn answer(&self, question: &str, ctx: &AdviceContext) -> String {
        let q = question.to_lowercase();

        if q.contains("tax") || q.contains("deduct") {
            return "I don't offer tax advice. For deductions, consult a qualified tax professional with your category breakdown in hand.".to_string();
        }

        if q.contains("run out")
            || q.contains("bankrupt")
            || q.contains("zero balance")
            || q.contains("out of money")
        {
            return match ctx.forecast.as_ref() {
                Some(fc) => match fc.run_out_in {
                    Some(h) => format!(
                        "At the current trend your balance could hit zero in {}.",
                        fmt_horizon(Some(h))
                    ),
                    None => "Good news: the projection never drops to zero within the selected horizon.".to_string(),
                },
                None => need("a forecast"),
            };
        }

        if q.contains("afford") || q.contains("buy") || q.contains("purchase") {
            return match ctx.forecast.as_ref() {
                Some(fc) => format!(
                    "The target purchase of ₹{:.0} is reachable {}.",
                    fc.assumptions.big_purchase,
                    fmt_horizon_in(fc.can_afford_in)
                ),
                None => need("a forecast"),
            };
        }

        if q.contains("average")
            || q.contains("monthly net")
            || q.contains("cash flow")
            || q.contains("surplus")
        {
            return match ctx.forecast.as_ref() {
                Some(fc) => format!(
                    "Your average monthly net over recent history is ₹{:.2}.",
                    fc.avg_monthly_net
                ),
                None => need("a forecast"),
            };
        }

        if q.contains("retire") {
            return match ctx.forecast.as_ref() {
                Some(fc) => format!(
                    "The retirement target of ₹{:.0} is reachable {}.",
                    fc.assumptions.retirement_target,
                    fmt_horizon_in(fc.retirement_in)
                ),
                None => need("a forecast"),
            };
        }

        if q.contains("recommend") || q.contains("advice") || q.contains("should i") {
            if let Some(fc) = ctx.forecast.as_ref() {
                return fc.recommendation.clone();
            }
            if let Some(gauge) = ctx.gauge.as_ref() {
                return format!(
                    "You have used {}% of your monthly budget ({}). Keep discretionary spend in check.",
                    gauge.percent, gauge.status
                );
            }
            return need("a forecast or a budget gauge");
        }

        if q.contains("total") || q.contains("spent") || q.contains("how much") {
            return match ctx.total_spent {
                Some(total) => format!("Total spend in the selected period: ₹{:.2}.", total),
                None => need("a spending summary"),
            };
        }

        if q.contains("categor") || q.contains("breakdown") {
            return match ctx.category_totals.as_ref() {
                Some(totals) if !totals.is_empty() => {
                    let mut pairs: Vec<_> = totals.iter().collect();
                    pairs.sort_by(|a, b| b.1.partial_cmp(a.1).unwrap_or(std::cmp::Ordering::Equal));
                    let parts: Vec<String> = pairs
                        .iter()
                        .map(|(cat, amt)| format!("{}: ₹{:.2}", cat, amt))
                        .collect();
                    format!("Spending by category: {}.", parts.join(", "))
                }
                _ => need("a category breakdown"),
            };
        }

        if q.contains("trend") {
            return match ctx.comparison.as_ref() {
                Some(cmp) => {
                    let change = match cmp.total_change {
                        PercentChange::Change(pct) => format!("{:+.2}% change", pct),
                        PercentChange::NewSpending => "new spending".to_string(),
                    };
                    format!(
                        "Spend moved from ₹{:.2} to ₹{:.2} month over month ({}).",
                        cmp.total_previous, cmp.total_current, change
                    )
                }
                None => need("a month-over-month comparison"),
            };
        }

        if q.contains("save") || q.contains("reduce") || q.contains("cut") {
            if let Some(report) = ctx.recurring.as_ref() {
                if let Some(top) = report.recurring.first() {
                    return top.suggestion.clone();
                }
                return "No recurring charges found in the lookback window; nothing obvious to cut.".to_string();
            }
            return need("a recurring-charges report");
        }

        if q.contains("budget") || q.contains("limit") {
            return match ctx.gauge.as_ref() {
                Some(gauge) => format!(
                    "You have spent ₹{:.2} of your ₹{:.0} limit ({}%, {}).",
                    gauge.spend, gauge.limit, gauge.percent, gauge.status
                ),
                None => need("a budget gauge"),
            };
        }

        "I can help with your budget, spending totals, category breakdowns, trends, recurring charges, and forecasts. Try asking e.g. \"when can I afford it?\" or \"how much did I spend?\".".to_string()
    }
}

fn need(what: &str) -> String {
    format!("I need {} to answer that. Load your data first.", what)
}

fn fmt_horizon(h: Option<Horizon>) -> String {
    match h {
        Some(h) => h.to_string(),
        None => "not within the selected horizon".to_string(),
    }
}

fn fmt_horizon_in(h: Option<Horizon>) -> String {
    match h {
        Some(h) => format!("in {}", h),
        None => "not within the selected horizon".to_string(),
    }
}
