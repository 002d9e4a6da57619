//! Keyword-driven transaction categorization.
//!
//! Matching is case-insensitive substring containment over the merchant
//! and raw text concatenated, against an ordered keyword table. Table
//! order is a priority contract: the first category whose keyword list
//! matches wins. Substring matching also hits keywords embedded inside
//! longer words - an accepted tradeoff for simplicity.

use crate::models::{BudgetCategory, Category};

/// Ordered keyword table for the insights taxonomy. Order matters.
pub const CATEGORY_KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Food,
        &["restaurant", "cafe", "dominos", "mcdonald", "zomato", "swiggy", "coffee", "dine"],
    ),
    (
        Category::Travel,
        &["uber", "ola", "taxi", "flight", "airasia", "indigo", "train", "bus", "travel"],
    ),
    (
        Category::Bills,
        &["electricity", "water", "bill", "gas bill", "phone bill", "isp", "internet", "broadband", "payment"],
    ),
    (
        Category::Groceries,
        &["grocer", "supermarket", "bigbasket", "grocery", "dmart"],
    ),
    (
        Category::Subscriptions,
        &["spotify", "netflix", "amazon prime", "primevideo", "hotstar", "subscription", "payment to"],
    ),
    (
        Category::Shopping,
        &["amazon", "flipkart", "myntra", "shopping", "store"],
    ),
    (
        Category::Healthcare,
        &["clinic", "hospital", "pharmacy", "medicare", "medicines", "chemist"],
    ),
];

/// Ordered keyword table for the budgeting taxonomy.
pub const BUDGET_KEYWORDS: &[(BudgetCategory, &[&str])] = &[
    (
        BudgetCategory::FoodAndDining,
        &["zomato", "swiggy", "dominos", "restaurant"],
    ),
    (
        BudgetCategory::Transportation,
        &["uber", "ola", "metro", "bus"],
    ),
    (
        BudgetCategory::Shopping,
        &["amazon", "flipkart", "mall", "store"],
    ),
    (
        BudgetCategory::Entertainment,
        &["bookmyshow", "movie", "cinema"],
    ),
    (
        BudgetCategory::Utilities,
        &["electricity", "water", "gas", "internet"],
    ),
    (
        BudgetCategory::Healthcare,
        &["hospital", "pharmacy", "doctor"],
    ),
];

/// Map a (merchant, raw text) pair to an insights category.
///
/// Pure and deterministic; no match falls back to `Other`, never None.
pub fn categorize(merchant: Option<&str>, raw_text: &str) -> Category {
    let haystack = format!("{} {}", merchant.unwrap_or(""), raw_text).to_lowercase();

    for (category, keywords) in CATEGORY_KEYWORDS {
        if keywords.iter().any(|kw| haystack.contains(kw)) {
            return *category;
        }
    }

    Category::Other
}

/// Map a merchant label to a budgeting category.
pub fn budget_category(merchant: &str) -> BudgetCategory {
    let haystack = merchant.to_lowercase();

    for (category, keywords) in BUDGET_KEYWORDS {
        if keywords.iter().any(|kw| haystack.contains(kw)) {
            return *category;
        }
    }

    BudgetCategory::Others
}
