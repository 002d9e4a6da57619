//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - init, status, set-limit and the shared `open_db` utility
//! - `ingest` - alert ingestion and CSV / ledger imports
//! - `reports` - gauge, comparison, recurring, merchants, trends
//! - `forecast` - balance projection and invest-vs-EMI simulation
//! - `chat` - question answering over computed results

pub mod chat;
pub mod core;
pub mod forecast;
pub mod ingest;
pub mod reports;

// Re-export command functions for main.rs
pub use chat::*;
pub use core::*;
pub use forecast::*;
pub use ingest::*;
pub use reports::*;

/// Truncate a string to a maximum length, adding "..." if truncated
pub fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        format!("{}...", &s[..max.saturating_sub(3)])
    }
}
