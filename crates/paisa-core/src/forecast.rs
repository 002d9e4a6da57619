//! Balance forecasting and scenario simulation
//!
//! The forward projection derives an average monthly net cash flow from
//! signed ledger history (income positive, spend negative - deliberately
//! the opposite convention from the spend-only transaction store) and
//! compounds it month by month under a configurable annual return.
//!
//! The investment / EMI simulators are self-contained numeric routines
//! used to compare "invest monthly" against "take a loan" scenarios; they
//! share no state with the historical projection.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::warn;

use crate::models::LedgerEntry;

/// Number of trailing months of history used for the monthly-net average
const AVG_WINDOW_MONTHS: usize = 6;

/// A month offset expressed as whole years plus remaining months
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Horizon {
    pub years: u32,
    pub months: u32,
}

impl Horizon {
    fn from_month_index(m: u32) -> Self {
        Self {
            years: m / 12,
            months: m % 12,
        }
    }
}

impl std::fmt::Display for Horizon {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} years {} months", self.years, self.months)
    }
}

/// One projected point: month index (1-based) and end-of-month balance
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimelinePoint {
    pub month: u32,
    pub balance: f64,
}

/// Forecast inputs
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ForecastParams {
    pub current_balance: f64,
    pub horizon_years: u32,
    /// Target amount for the "can afford" milestone
    pub big_purchase: f64,
    /// Expected annual return on savings, in percent (e.g. 5.0)
    pub expected_return_annual: f64,
    pub retirement_target: f64,
}

impl Default for ForecastParams {
    fn default() -> Self {
        Self {
            current_balance: 50_000.0,
            horizon_years: 10,
            big_purchase: 100_000.0,
            expected_return_annual: 5.0,
            retirement_target: 5_000_000.0,
        }
    }
}

/// Forecast result: projected timeline, milestones, and a recommendation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Forecast {
    pub avg_monthly_net: f64,
    pub current_balance: f64,
    pub timeline: Vec<TimelinePoint>,
    /// First month the projected balance drops to zero or below
    pub run_out_in: Option<Horizon>,
    /// First month the balance covers the big purchase
    pub can_afford_in: Option<Horizon>,
    /// First month the balance reaches the retirement target
    pub retirement_in: Option<Horizon>,
    pub recommendation: String,
    pub assumptions: ForecastParams,
}

/// Mean of the per-calendar-month net sums over the most recent months
/// present in history (at most six; division is by the count actually
/// present, never by a fixed six).
pub fn average_monthly_net(history: &[LedgerEntry]) -> f64 {
    let mut monthly: BTreeMap<(i32, u32), f64> = BTreeMap::new();
    for entry in history {
        *monthly
            .entry((entry.date.year(), entry.date.month()))
            .or_insert(0.0) += entry.amount;
    }

    let sums: Vec<f64> = monthly.values().copied().collect();
    let window = &sums[sums.len().saturating_sub(AVG_WINDOW_MONTHS)..];
    if window.is_empty() {
        return 0.0;
    }
    window.iter().sum::<f64>() / window.len() as f64
}

/// Project the balance forward month by month.
///
/// `balance[i] = balance[i-1] * (1 + monthly_rate) + avg_monthly_net`,
/// where the monthly rate is the annual rate compounded down
/// (`(1+r)^(1/12) - 1`) for a positive rate, else zero. Pure function of
/// history and params: identical inputs yield identical output.
pub fn forecast(history: &[LedgerEntry], params: ForecastParams) -> Forecast {
    let params = clamp_params(params);

    let avg_monthly_net = average_monthly_net(history);
    let annual_rate = params.expected_return_annual / 100.0;
    let monthly_rate = if annual_rate > 0.0 {
        (1.0 + annual_rate).powf(1.0 / 12.0) - 1.0
    } else {
        0.0
    };

    let months = params.horizon_years * 12;
    let mut balance = params.current_balance;
    let mut timeline = Vec::with_capacity(months as usize);
    let mut run_out_month = None;
    let mut afford_month = None;
    let mut retirement_month = None;

    for month in 1..=months {
        balance = balance * (1.0 + monthly_rate) + avg_monthly_net;
        timeline.push(TimelinePoint {
            month,
            balance: round2(balance),
        });
        if run_out_month.is_none() && balance <= 0.0 {
            run_out_month = Some(month);
        }
        if afford_month.is_none() && balance >= params.big_purchase {
            afford_month = Some(month);
        }
        if retirement_month.is_none() && balance >= params.retirement_target {
            retirement_month = Some(month);
        }
    }

    let run_out_in = run_out_month.map(Horizon::from_month_index);
    let can_afford_in = afford_month.map(Horizon::from_month_index);
    let retirement_in = retirement_month.map(Horizon::from_month_index);

    let recommendation =
        recommend(run_out_month, afford_month, retirement_month, &params);

    Forecast {
        avg_monthly_net: round2(avg_monthly_net),
        current_balance: round2(params.current_balance),
        timeline,
        run_out_in,
        can_afford_in,
        retirement_in,
        recommendation,
        assumptions: params,
    }
}

fn clamp_params(mut params: ForecastParams) -> ForecastParams {
    if params.horizon_years == 0 {
        warn!("Forecast horizon of 0 years clamped to 1");
        params.horizon_years = 1;
    }
    params
}

/// One-line recommendation, chosen by priority: a run-out warning inside
/// 12 months beats the afford message, which beats the retirement
/// message, which beats the generic surplus advice.
fn recommend(
    run_out: Option<u32>,
    afford: Option<u32>,
    retirement: Option<u32>,
    params: &ForecastParams,
) -> String {
    if let Some(m) = run_out.filter(|&m| m <= 12) {
        return format!(
            "Warning: at the current trend you may run out of money in {}y {}m. Reduce expenses or increase income.",
            m / 12,
            m % 12
        );
    }
    if let Some(m) = afford {
        return format!(
            "Stay the course: you can afford ₹{:.0} in {}y {}m assuming the current trend and {:.0}% return.",
            params.big_purchase,
            m / 12,
            m % 12,
            params.expected_return_annual
        );
    }
    if let Some(m) = retirement {
        return format!(
            "On track: the retirement target could be reached in {}y {}m.",
            m / 12,
            m % 12
        );
    }
    "Consider increasing your monthly surplus or return rate to meet goals within the horizon."
        .to_string()
}

// ---------------------------------------------------------------------------
// Scenario simulators
// ---------------------------------------------------------------------------

/// Result of a fixed-contribution investment simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InvestmentOutcome {
    pub final_value: f64,
    pub trajectory: Vec<f64>,
}

/// Result of an amortized-loan simulation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EmiOutcome {
    /// Equated monthly installment
    pub emi: f64,
    pub total_paid: f64,
    pub interest_paid: f64,
    pub schedule: Vec<f64>,
}

/// Compound a fixed monthly contribution at a flat annual rate.
///
/// Lower fidelity than [`forecast`]: the monthly rate is `annual / 12`,
/// not the compounded-down equivalent.
pub fn simulate_investment(
    principal: f64,
    monthly: f64,
    annual_rate_percent: f64,
    months: u32,
) -> InvestmentOutcome {
    let monthly_rate = annual_rate_percent / 100.0 / 12.0;
    let mut balance = principal;
    let mut trajectory = Vec::with_capacity(months as usize);

    for _ in 0..months {
        balance = balance * (1.0 + monthly_rate) + monthly;
        trajectory.push(round2(balance));
    }

    InvestmentOutcome {
        final_value: round2(balance),
        trajectory,
    }
}

/// Standard amortized-loan EMI: `P*r*(1+r)^n / ((1+r)^n - 1)`.
///
/// Degenerate cases are defined, not errors: a zero rate amortizes
/// linearly (`P/n`) and zero months yields a zero installment.
pub fn simulate_emi(
    purchase_amount: f64,
    down_payment: f64,
    annual_rate_percent: f64,
    months: u32,
) -> EmiOutcome {
    let principal = (purchase_amount - down_payment).max(0.0);
    let r = annual_rate_percent / 100.0 / 12.0;

    let emi = if months == 0 {
        0.0
    } else if r == 0.0 {
        principal / months as f64
    } else {
        let growth = (1.0 + r).powi(months as i32);
        principal * r * growth / (growth - 1.0)
    };

    let total_paid = round2(emi * months as f64 + down_payment);
    let interest_paid = round2(total_paid - purchase_amount);

    EmiOutcome {
        emi: round2(emi),
        total_paid,
        interest_paid,
        schedule: vec![round2(emi); months as usize],
    }
}

/// Inputs for the invest-vs-EMI comparison
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScenarioInputs {
    pub months: u32,
    pub purchase_amount: f64,
    pub down_payment: f64,
    /// Loan APR, percent
    pub loan_apr: f64,
    /// Monthly investment contribution
    pub investment_monthly: f64,
    /// Expected equity return, percent annual
    pub equity_apr: f64,
    /// Expected gold return, percent annual
    pub gold_apr: f64,
    pub monthly_income: f64,
    /// Baseline savings rate as a fraction of income
    pub base_savings_rate: f64,
}

impl Default for ScenarioInputs {
    fn default() -> Self {
        Self {
            months: 12,
            purchase_amount: 80_000.0,
            down_payment: 10_000.0,
            loan_apr: 16.0,
            investment_monthly: 3_000.0,
            equity_apr: 12.0,
            gold_apr: 6.0,
            monthly_income: 45_000.0,
            base_savings_rate: 0.25,
        }
    }
}

/// Financial-health impact of each path
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinancialHealth {
    pub income: f64,
    pub baseline_savings_rate: f64,
    pub baseline_monthly_savings: f64,
    pub emi_monthly_payment: f64,
    pub emi_savings_rate: f64,
    /// 1.0 when the EMI fits in 30% of income, 0.5 within 50%, else 0.2
    pub emi_affordability_score: f64,
    pub invest_savings_rate: f64,
    /// 1.0 with six months of buffer, 0.6 with three, else 0.3
    pub emergency_buffer_score: f64,
    pub summary: String,
}

/// Invest-vs-EMI comparison result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub months: u32,
    pub emi: EmiOutcome,
    pub equity: InvestmentOutcome,
    pub gold: InvestmentOutcome,
    /// Which investment path ends highest: "equity" or "gold"
    pub best: String,
    pub message: String,
    pub health: FinancialHealth,
}

/// Compare taking a loan for a purchase against investing the same
/// monthly outlay, and score the health impact of each path.
pub fn compare_invest_vs_emi(inputs: ScenarioInputs) -> ScenarioComparison {
    let emi = simulate_emi(
        inputs.purchase_amount,
        inputs.down_payment,
        inputs.loan_apr,
        inputs.months,
    );
    let equity = simulate_investment(0.0, inputs.investment_monthly, inputs.equity_apr, inputs.months);
    let gold = simulate_investment(0.0, inputs.investment_monthly, inputs.gold_apr, inputs.months);

    let (best, best_value) = if equity.final_value >= gold.final_value {
        ("equity", equity.final_value)
    } else {
        ("gold", gold.final_value)
    };

    let message = format!(
        "Investing ₹{:.0}/mo yields up to ₹{:.0} in {} months, while EMI total paid is ₹{:.0} (interest ₹{:.0}).",
        inputs.investment_monthly, best_value, inputs.months, emi.total_paid, emi.interest_paid
    );

    let income = inputs.monthly_income;
    let base_savings = income * inputs.base_savings_rate;
    let emi_payment = emi.emi;

    let savings_with_emi = (base_savings - emi_payment).max(0.0);
    let emi_savings_rate = if income > 0.0 { savings_with_emi / income } else { 0.0 };

    let savings_with_invest = (base_savings - inputs.investment_monthly).max(0.0);
    let invest_savings_rate = if income > 0.0 { savings_with_invest / income } else { 0.0 };

    let emi_affordability_score = if emi_payment <= 0.3 * income {
        1.0
    } else if emi_payment <= 0.5 * income {
        0.5
    } else {
        0.2
    };

    let buffer_months = if income > 0.0 {
        base_savings * inputs.months as f64 / income
    } else {
        0.0
    };
    let emergency_buffer_score = if buffer_months >= 6.0 {
        1.0
    } else if buffer_months >= 3.0 {
        0.6
    } else {
        0.3
    };

    let summary = if emi_savings_rate < inputs.base_savings_rate {
        "EMI reduces savings rate".to_string()
    } else {
        "EMI manageable".to_string()
    };

    ScenarioComparison {
        months: inputs.months,
        emi,
        equity,
        gold,
        best: best.to_string(),
        message,
        health: FinancialHealth {
            income,
            baseline_savings_rate: round2(inputs.base_savings_rate),
            baseline_monthly_savings: round2(base_savings),
            emi_monthly_payment: round2(emi_payment),
            emi_savings_rate: round2(emi_savings_rate),
            emi_affordability_score,
            invest_savings_rate: round2(invest_savings_rate),
            emergency_buffer_score,
            summary,
        },
    }
}

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn entry(date: &str, amount: f64) -> LedgerEntry {
        LedgerEntry {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            amount,
            description: String::new(),
        }
    }

    #[test]
    fn test_average_monthly_net_divides_by_months_present() {
        // Two months of history: divide by 2, not a fixed 6
        let history = vec![
            entry("2024-01-05", 45_000.0),
            entry("2024-01-20", -20_000.0),
            entry("2024-02-05", 45_000.0),
            entry("2024-02-20", -30_000.0),
        ];
        assert_eq!(average_monthly_net(&history), 20_000.0);
    }

    #[test]
    fn test_average_monthly_net_uses_recent_six_months() {
        // 8 months of +1000, then the oldest two are -100000 each; only
        // the most recent 6 should count
        let mut history = Vec::new();
        history.push(entry("2023-01-15", -100_000.0));
        history.push(entry("2023-02-15", -100_000.0));
        for month in 3..=8 {
            history.push(entry(&format!("2023-{:02}-15", month), 1_000.0));
        }
        assert_eq!(average_monthly_net(&history), 1_000.0);
    }

    #[test]
    fn test_average_monthly_net_empty() {
        assert_eq!(average_monthly_net(&[]), 0.0);
    }

    #[test]
    fn test_forecast_zero_rate_is_linear() {
        let history = vec![entry("2024-01-15", -1_000.0)];
        let params = ForecastParams {
            current_balance: 10_000.0,
            horizon_years: 1,
            expected_return_annual: 0.0,
            ..Default::default()
        };
        let fc = forecast(&history, params);
        assert_eq!(fc.timeline.len(), 12);
        assert_eq!(fc.timeline[0].balance, 9_000.0);
        assert_eq!(fc.timeline[11].balance, -2_000.0);
    }

    #[test]
    fn test_forecast_run_out_milestone() {
        let history = vec![entry("2024-01-15", -5_000.0)];
        let params = ForecastParams {
            current_balance: 20_000.0,
            horizon_years: 2,
            expected_return_annual: 0.0,
            ..Default::default()
        };
        let fc = forecast(&history, params);
        // 20000 - 5000/mo: month 4 hits exactly 0
        assert_eq!(fc.run_out_in, Some(Horizon { years: 0, months: 4 }));
        assert!(fc.recommendation.starts_with("Warning"));
    }

    #[test]
    fn test_forecast_afford_milestone_and_priority() {
        let history = vec![entry("2024-01-15", 10_000.0)];
        let params = ForecastParams {
            current_balance: 50_000.0,
            horizon_years: 2,
            big_purchase: 100_000.0,
            expected_return_annual: 0.0,
            retirement_target: 5_000_000.0,
        };
        let fc = forecast(&history, params);
        // 50000 + 10000/mo reaches 100000 at month 5
        assert_eq!(fc.can_afford_in, Some(Horizon { years: 0, months: 5 }));
        assert_eq!(fc.run_out_in, None);
        assert!(fc.recommendation.starts_with("Stay the course"));
    }

    #[test]
    fn test_forecast_generic_recommendation() {
        let history = vec![entry("2024-01-15", 10.0)];
        let params = ForecastParams {
            current_balance: 100.0,
            horizon_years: 1,
            big_purchase: 1_000_000.0,
            expected_return_annual: 0.0,
            retirement_target: 5_000_000.0,
        };
        let fc = forecast(&history, params);
        assert!(fc.recommendation.contains("surplus"));
    }

    #[test]
    fn test_forecast_is_idempotent() {
        let history = vec![
            entry("2024-01-05", 45_000.0),
            entry("2024-01-20", -38_000.0),
            entry("2024-02-05", 45_000.0),
            entry("2024-02-18", -41_000.0),
        ];
        let params = ForecastParams::default();
        let a = forecast(&history, params);
        let b = forecast(&history, params);
        assert_eq!(a, b);
    }

    #[test]
    fn test_forecast_horizon_clamped() {
        let fc = forecast(&[], ForecastParams { horizon_years: 0, ..Default::default() });
        assert_eq!(fc.assumptions.horizon_years, 1);
        assert_eq!(fc.timeline.len(), 12);
    }

    #[test]
    fn test_simulate_investment() {
        // Zero rate: pure accumulation
        let outcome = simulate_investment(0.0, 1_000.0, 0.0, 12);
        assert_eq!(outcome.final_value, 12_000.0);
        assert_eq!(outcome.trajectory.len(), 12);

        // Positive rate ends above pure accumulation
        let outcome = simulate_investment(0.0, 1_000.0, 12.0, 12);
        assert!(outcome.final_value > 12_000.0);
    }

    #[test]
    fn test_simulate_emi_standard() {
        // 70000 principal at 16% APR over 12 months
        let outcome = simulate_emi(80_000.0, 10_000.0, 16.0, 12);
        // EMI for P=70000, r=0.01333, n=12 is about 6355
        assert!((outcome.emi - 6_355.0).abs() < 5.0);
        assert_eq!(outcome.schedule.len(), 12);
        assert!(outcome.interest_paid > 0.0);
    }

    #[test]
    fn test_simulate_emi_degenerate_cases() {
        // Zero rate amortizes linearly
        let outcome = simulate_emi(12_000.0, 0.0, 0.0, 12);
        assert_eq!(outcome.emi, 1_000.0);
        assert_eq!(outcome.interest_paid, 0.0);

        // Zero months yields zero installment, not a division error
        let outcome = simulate_emi(12_000.0, 0.0, 10.0, 0);
        assert_eq!(outcome.emi, 0.0);
        assert!(outcome.schedule.is_empty());
    }

    #[test]
    fn test_compare_invest_vs_emi_defaults() {
        let cmp = compare_invest_vs_emi(ScenarioInputs::default());
        // Equity at 12% beats gold at 6%
        assert_eq!(cmp.best, "equity");
        assert!(cmp.equity.final_value > cmp.gold.final_value);
        // EMI of ~6355 fits within 30% of a 45000 income
        assert_eq!(cmp.health.emi_affordability_score, 1.0);
        // 11250/mo savings over 12 months is a 3-month buffer
        assert_eq!(cmp.health.emergency_buffer_score, 0.6);
        assert_eq!(cmp.health.summary, "EMI reduces savings rate");
    }
}
