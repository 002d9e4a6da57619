//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI
//! arguments. The actual command implementations are in the `commands`
//! module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Paisa - Track, understand and forecast your spending
#[derive(Parser)]
#[command(name = "paisa")]
#[command(about = "Personal finance tracker with budgets and forecasting", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "paisa.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Ingest a single bank SMS / UPI alert
    Ingest {
        /// Raw notification text
        #[arg(short, long)]
        text: String,

        /// Date the alert was received (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        received: Option<String>,
    },

    /// Import a spending statement CSV
    Import {
        /// CSV file with Date, Amount, Description columns
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Upload signed cash-flow history (replaces previous upload)
    Ledger {
        /// CSV file with Date, Amount (signed), Description columns
        #[arg(short, long)]
        file: PathBuf,
    },

    /// Show this month's budget gauge
    Gauge {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare a month's spending against the previous month
    Compare {
        /// Year (defaults to current)
        #[arg(short, long)]
        year: Option<i32>,

        /// Month 1-12 (defaults to current)
        #[arg(short, long)]
        month: Option<u32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Detect recurring charges (likely subscriptions)
    Recurring {
        /// Lookback window in months
        #[arg(long, default_value = "3")]
        months: u32,

        /// Minimum occurrences for a merchant to qualify
        #[arg(long, default_value = "2")]
        min: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Top merchants by total spend
    Merchants {
        /// How many merchants to show
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Monthly spending trend
    Trends {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Forecast your balance from uploaded cash-flow history
    Forecast {
        /// Current balance
        #[arg(short, long, default_value = "50000")]
        balance: f64,

        /// Projection horizon in years
        #[arg(short, long, default_value = "10")]
        years: u32,

        /// Target purchase amount for the affordability milestone
        #[arg(long, default_value = "100000")]
        big_purchase: f64,

        /// Expected annual return on savings, percent
        #[arg(long, default_value = "5")]
        annual_return: f64,

        /// Retirement corpus target
        #[arg(long, default_value = "5000000")]
        retirement_target: f64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compare investing monthly against buying on EMI
    Simulate {
        /// Simulation length in months
        #[arg(long, default_value = "12")]
        months: u32,

        /// Purchase amount financed by the loan
        #[arg(long, default_value = "80000")]
        purchase: f64,

        /// Down payment on the purchase
        #[arg(long, default_value = "10000")]
        down: f64,

        /// Loan APR, percent
        #[arg(long, default_value = "16")]
        loan_apr: f64,

        /// Monthly investment contribution
        #[arg(long, default_value = "3000")]
        invest_monthly: f64,

        /// Monthly income (for affordability scoring)
        #[arg(long, default_value = "45000")]
        income: f64,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Set the monthly budget limit
    SetLimit {
        /// Limit amount
        #[arg(short, long)]
        amount: f64,
    },

    /// Ask a question about your finances
    Chat {
        /// The question
        #[arg(short, long)]
        question: String,
    },

    /// Show database status and record counts
    Status,
}
