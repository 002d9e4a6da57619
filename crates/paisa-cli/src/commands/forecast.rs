//! Forecast and simulation command implementations

use std::path::Path;

use anyhow::Result;
use paisa_core::forecast::{compare_invest_vs_emi, forecast, ForecastParams, ScenarioInputs};

use super::open_db;

pub fn cmd_forecast(db_path: &Path, params: ForecastParams, json: bool) -> Result<()> {
    let db = open_db(db_path)?;
    let history = db.list_ledger()?;

    if history.is_empty() {
        println!("⚠️  No cash-flow history uploaded. Run `paisa ledger --file history.csv` first.");
    }

    let fc = forecast(&history, params);

    if json {
        println!("{}", serde_json::to_string_pretty(&fc)?);
        return Ok(());
    }

    println!();
    println!("🔮 Balance Forecast ({} years)", fc.assumptions.horizon_years);
    println!("   ─────────────────────────────────────────────────────────────");
    println!("   Starting balance:    ₹{:.2}", fc.current_balance);
    println!("   Avg monthly net:     ₹{:.2}", fc.avg_monthly_net);
    println!(
        "   Expected return:     {:.1}% / year",
        fc.assumptions.expected_return_annual
    );
    if let Some(last) = fc.timeline.last() {
        println!("   Projected balance:   ₹{:.2}", last.balance);
    }

    println!();
    match fc.run_out_in {
        Some(h) => println!("   ⚠️  Balance hits zero in {}", h),
        None => println!("   Balance stays positive over the horizon"),
    }
    match fc.can_afford_in {
        Some(h) => println!(
            "   🛒 ₹{:.0} purchase affordable in {}",
            fc.assumptions.big_purchase, h
        ),
        None => println!(
            "   🛒 ₹{:.0} purchase not reachable within the horizon",
            fc.assumptions.big_purchase
        ),
    }
    match fc.retirement_in {
        Some(h) => println!(
            "   🏖️  Retirement target ₹{:.0} reached in {}",
            fc.assumptions.retirement_target, h
        ),
        None => println!(
            "   🏖️  Retirement target ₹{:.0} not reached within the horizon",
            fc.assumptions.retirement_target
        ),
    }

    println!();
    println!("   💡 {}", fc.recommendation);

    Ok(())
}

pub fn cmd_simulate(inputs: ScenarioInputs, json: bool) -> Result<()> {
    let cmp = compare_invest_vs_emi(inputs);

    if json {
        println!("{}", serde_json::to_string_pretty(&cmp)?);
        return Ok(());
    }

    println!();
    println!("⚖️  Invest vs EMI ({} months)", cmp.months);
    println!("   ─────────────────────────────────────────────────────────────");
    println!(
        "   EMI:    ₹{:.2}/mo, total paid ₹{:.2} (interest ₹{:.2})",
        cmp.emi.emi, cmp.emi.total_paid, cmp.emi.interest_paid
    );
    println!("   Equity: final value ₹{:.2}", cmp.equity.final_value);
    println!("   Gold:   final value ₹{:.2}", cmp.gold.final_value);
    println!();
    println!("   Best investment path: {}", cmp.best);
    println!("   💡 {}", cmp.message);

    println!();
    println!("   Financial health:");
    println!(
        "   Savings rate: {:.0}% baseline, {:.0}% with EMI, {:.0}% while investing",
        cmp.health.baseline_savings_rate * 100.0,
        cmp.health.emi_savings_rate * 100.0,
        cmp.health.invest_savings_rate * 100.0
    );
    println!(
        "   Affordability score: {:.1}   Emergency buffer score: {:.1}",
        cmp.health.emi_affordability_score, cmp.health.emergency_buffer_score
    );
    println!("   {}", cmp.health.summary);

    Ok(())
}
