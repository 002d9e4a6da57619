//! Paisa CLI - Personal finance tracker
//!
//! Usage:
//!   paisa init                        Initialize database
//!   paisa ingest --text "Rs 500 ..."  Ingest a bank SMS / UPI alert
//!   paisa import --file statement.csv Import a spending statement
//!   paisa gauge                       Show this month's budget gauge
//!   paisa forecast --balance 50000    Project your balance forward

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Ingest { text, received } => {
            commands::cmd_ingest(&cli.db, &text, received.as_deref())
        }
        Commands::Import { file } => commands::cmd_import(&cli.db, &file),
        Commands::Ledger { file } => commands::cmd_ledger(&cli.db, &file),
        Commands::Gauge { json } => commands::cmd_gauge(&cli.db, json),
        Commands::Compare { year, month, json } => {
            commands::cmd_compare(&cli.db, year, month, json)
        }
        Commands::Recurring { months, min, json } => {
            commands::cmd_recurring(&cli.db, months, min, json)
        }
        Commands::Merchants { limit, json } => commands::cmd_merchants(&cli.db, limit, json),
        Commands::Trends { json } => commands::cmd_trends(&cli.db, json),
        Commands::Forecast {
            balance,
            years,
            big_purchase,
            annual_return,
            retirement_target,
            json,
        } => commands::cmd_forecast(
            &cli.db,
            paisa_core::ForecastParams {
                current_balance: balance,
                horizon_years: years,
                big_purchase,
                expected_return_annual: annual_return,
                retirement_target,
            },
            json,
        ),
        Commands::Simulate {
            months,
            purchase,
            down,
            loan_apr,
            invest_monthly,
            income,
            json,
        } => commands::cmd_simulate(
            paisa_core::ScenarioInputs {
                months,
                purchase_amount: purchase,
                down_payment: down,
                loan_apr,
                investment_monthly: invest_monthly,
                monthly_income: income,
                ..Default::default()
            },
            json,
        ),
        Commands::SetLimit { amount } => commands::cmd_set_limit(&cli.db, amount),
        Commands::Chat { question } => commands::cmd_chat(&cli.db, &question),
        Commands::Status => commands::cmd_status(&cli.db),
    }
}
