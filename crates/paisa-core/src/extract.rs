//! Best-effort extraction of amount, merchant and date from raw
//! transaction notifications (bank SMS / UPI alerts) and CSV rows.
//!
//! Extraction is a pure function of its input and never fails: each field
//! independently degrades to a documented default (None / "Unknown" /
//! received date) instead of aborting the whole record.

use chrono::{Datelike, NaiveDate, Utc};
use regex::Regex;
use serde::Deserialize;
use std::sync::OnceLock;

/// Partial record produced from one raw notification.
#[derive(Debug, Clone, PartialEq)]
pub struct ExtractedAlert {
    /// Currency-marked amount; None when no pattern matched
    pub amount: Option<f64>,
    /// Merchant token; None when no heuristic resolved one
    pub merchant: Option<String>,
    /// Date found in the text, else the received date, else today
    pub date: NaiveDate,
    pub raw_text: String,
}

/// One structured row of a bank statement export.
///
/// The explicit schema (with header aliases) is the single normalization
/// point for loosely-named CSV columns - business logic never probes for
/// alternate keys.
#[derive(Debug, Clone, Deserialize)]
pub struct CsvRow {
    #[serde(alias = "Date", alias = "DATE")]
    pub date: String,
    #[serde(alias = "Amount", alias = "AMOUNT")]
    pub amount: String,
    #[serde(alias = "Description", alias = "DESCRIPTION", alias = "Merchant", default)]
    pub description: String,
}

/// Merchants recognized by the keyword scan when no " at " marker exists
const KNOWN_MERCHANTS: &[&str] = &[
    "amazon", "zomato", "uber", "ola", "swiggy", "myntra", "flipkart",
];

fn amount_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Matches "₹500", "Rs 299.50", "Rs.120", "INR 1000"
    RE.get_or_init(|| Regex::new(r"(?:₹|Rs\.?|INR)\s?(\d+(?:\.\d{1,2})?)").unwrap())
}

fn iso_date_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(\d{4}-\d{2}-\d{2})\b").unwrap())
}

fn numeric_date_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\b(\d{1,2})[/-](\d{1,2})[/-](\d{4})\b").unwrap())
}

fn day_month_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"(?i)\b(\d{1,2})[ -](Jan|Feb|Mar|Apr|May|Jun|Jul|Aug|Sep|Oct|Nov|Dec)[a-z]*(?:[ -,]+(\d{4}))?",
        )
        .unwrap()
    })
}

/// Parse a raw SMS / UPI notification into a partial record.
///
/// Example: "ICICI Bank: Rs 500 spent at Uber on 25-Sep"
pub fn parse_alert(text: &str, received: Option<NaiveDate>) -> ExtractedAlert {
    ExtractedAlert {
        amount: extract_amount(text),
        merchant: extract_merchant(text),
        date: extract_date(text, received),
        raw_text: text.to_string(),
    }
}

/// First currency-marked numeral wins; absence yields None.
pub fn extract_amount(text: &str) -> Option<f64> {
    amount_regex()
        .captures(text)
        .and_then(|c| c.get(1))
        .and_then(|m| m.as_str().parse::<f64>().ok())
}

/// Merchant heuristic: the token after the last " at ", else a scan for
/// well-known marketplace / ride-hailing / food-delivery names.
pub fn extract_merchant(text: &str) -> Option<String> {
    if let Some((_, rest)) = text.rsplit_once(" at ") {
        let token = rest
            .split_whitespace()
            .next()
            .map(|t| t.trim_end_matches(['.', ',', ';', ':']));
        if let Some(token) = token.filter(|t| !t.is_empty()) {
            return Some(token.to_string());
        }
    }

    let lower = text.to_lowercase();
    for name in KNOWN_MERCHANTS {
        if lower.contains(name) {
            return Some(title_case(name));
        }
    }

    None
}

/// Scan the text for an embedded date in common Indian bank formats.
///
/// Falls back to the caller-supplied received date, then today. Never
/// errors - an unparsable date is MalformedInput, not a failure.
pub fn extract_date(text: &str, received: Option<NaiveDate>) -> NaiveDate {
    let fallback = || received.unwrap_or_else(|| Utc::now().date_naive());

    // 2024-01-05
    if let Some(c) = iso_date_regex().captures(text) {
        if let Ok(d) = NaiveDate::parse_from_str(&c[1], "%Y-%m-%d") {
            return d;
        }
    }

    // 05/01/2024 or 05-01-2024; day-first (Indian convention), month-first
    // only when day-first is impossible
    if let Some(c) = numeric_date_regex().captures(text) {
        let (a, b, year): (u32, u32, i32) = match (c[1].parse(), c[2].parse(), c[3].parse()) {
            (Ok(a), Ok(b), Ok(y)) => (a, b, y),
            _ => return fallback(),
        };
        if let Some(d) = NaiveDate::from_ymd_opt(year, b, a) {
            return d;
        }
        if let Some(d) = NaiveDate::from_ymd_opt(year, a, b) {
            return d;
        }
    }

    // "25-Sep", "25 Sep 2024", "3 September"
    if let Some(c) = day_month_regex().captures(text) {
        let day: u32 = match c[1].parse() {
            Ok(d) => d,
            Err(_) => return fallback(),
        };
        let year = c
            .get(3)
            .and_then(|y| y.as_str().parse::<i32>().ok())
            .unwrap_or_else(|| fallback().year());
        if let Some(month) = month_from_abbr(&c[2]) {
            if let Some(d) = NaiveDate::from_ymd_opt(year, month, day) {
                return d;
            }
        }
    }

    fallback()
}

fn month_from_abbr(abbr: &str) -> Option<u32> {
    match abbr.to_lowercase().as_str() {
        "jan" => Some(1),
        "feb" => Some(2),
        "mar" => Some(3),
        "apr" => Some(4),
        "may" => Some(5),
        "jun" => Some(6),
        "jul" => Some(7),
        "aug" => Some(8),
        "sep" => Some(9),
        "oct" => Some(10),
        "nov" => Some(11),
        "dec" => Some(12),
        _ => None,
    }
}

fn title_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

/// Parse an amount cell from a CSV export, tolerating currency markers,
/// thousands separators and parenthesized negatives.
pub fn parse_amount_cell(s: &str) -> Option<f64> {
    let cleaned: String = s
        .trim()
        .replace(['₹', ',', ' '], "")
        .replace("Rs.", "")
        .replace("Rs", "")
        .replace("INR", "")
        .replace('(', "-")
        .replace(')', "");

    cleaned.parse::<f64>().ok()
}

/// Parse a date cell from a CSV export.
///
/// Unlike alert text, the date column is authoritative: a cell that fails
/// every known format is an error the caller reports (the row is skipped).
pub fn parse_date_cell(s: &str) -> Option<NaiveDate> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d", // 2024-01-05
        "%d/%m/%Y", // 05/01/2024
        "%d-%m-%Y", // 05-01-2024
        "%m/%d/%Y", // 01/05/2024
        "%d %b %Y", // 5 Jan 2024
    ];

    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Some(date);
        }
    }

    None
}
