//! Process-wide configuration settings

use rusqlite::{params, OptionalExtension};
use tracing::warn;

use super::Database;
use crate::error::Result;

/// Default monthly spend ceiling used until an explicit limit is set
pub const DEFAULT_MONTHLY_LIMIT: f64 = 50_000.0;

const MONTHLY_LIMIT_KEY: &str = "monthly_limit";

impl Database {
    /// The configured monthly budget limit, or the default.
    pub fn monthly_limit(&self) -> Result<f64> {
        let conn = self.conn()?;
        let value: Option<String> = conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?",
                params![MONTHLY_LIMIT_KEY],
                |row| row.get(0),
            )
            .optional()?;

        Ok(value
            .and_then(|v| v.parse::<f64>().ok())
            .unwrap_or(DEFAULT_MONTHLY_LIMIT))
    }

    /// Replace the monthly budget limit.
    ///
    /// A non-positive limit is stored as-is but will be clamped by the
    /// gauge at read time; warn here so misconfiguration is visible early.
    pub fn set_monthly_limit(&self, limit: f64) -> Result<()> {
        if limit <= 0.0 {
            warn!(limit, "Monthly limit is not positive; gauge will clamp it to 1");
        }

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO settings (key, value) VALUES (?, ?)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![MONTHLY_LIMIT_KEY, limit.to_string()],
        )?;
        Ok(())
    }
}
