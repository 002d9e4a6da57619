//! End-to-end workflow tests: ingest raw data, aggregate it, gauge the
//! budget, forecast the balance and ask the advisor about the results.

use chrono::NaiveDate;
use paisa_core::advice::{AdviceBackend, AdviceContext, RuleBasedAdvisor};
use paisa_core::analytics;
use paisa_core::budget::{compute_gauge, GaugeStatus};
use paisa_core::forecast::{forecast, ForecastParams};
use paisa_core::ingest;
use paisa_core::models::{Category, TransactionSource};
use paisa_core::Database;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn test_alert_to_gauge_workflow() {
    let db = Database::in_memory().unwrap();
    let received = date("2024-01-26");

    let alerts = [
        "HDFC Bank: Rs 500 spent at Uber on 2024-01-05",
        "Zomato order ₹299.50 delivered on 2024-01-10",
        "Rs. 1200 paid at BigBasket on 2024-01-15",
        "INR 649 debited for Netflix subscription on 2024-01-20",
    ];
    for text in alerts {
        ingest::ingest_alert(&db, text, Some(received), TransactionSource::Sms).unwrap();
    }

    let january = db.query_month(2024, 1).unwrap();
    assert_eq!(january.len(), 4);

    let totals = analytics::category_totals(&january);
    assert_eq!(totals[&Category::Travel], 500.0);
    assert_eq!(totals[&Category::Food], 299.5);
    assert_eq!(totals[&Category::Subscriptions], 649.0);

    let gauge = compute_gauge(&january, 5000.0);
    // 2648.5 of 5000 is 53%
    assert_eq!(gauge.percent, 53);
    assert_eq!(gauge.status, GaugeStatus::Green);
}

#[test]
fn test_csv_import_to_comparison_workflow() {
    let db = Database::in_memory().unwrap();
    let csv = "Date,Amount,Description\n\
               2024-01-10,500.00,Zomato dinner\n\
               2024-02-10,800.00,Zomato dinner\n\
               2024-02-12,649.00,Netflix monthly\n";

    let summary = ingest::import_csv(&db, csv.as_bytes()).unwrap();
    assert_eq!(summary.inserted, 3);

    let cmp = analytics::month_over_month(&db, 2024, 2).unwrap();
    let food = &cmp.per_category[&Category::Food];
    assert_eq!(food.previous, 500.0);
    assert_eq!(food.current, 800.0);

    // Netflix is new in February
    let subs = &cmp.per_category[&Category::Subscriptions];
    assert_eq!(subs.change, analytics::PercentChange::NewSpending);
}

#[test]
fn test_recurring_detection_after_import() {
    let db = Database::in_memory().unwrap();
    let csv = "Date,Amount,Description\n\
               2024-01-15,649.00,Netflix monthly\n\
               2024-02-15,649.00,Netflix monthly\n\
               2024-02-20,120.00,Chai at CafeDay\n";
    ingest::import_csv(&db, csv.as_bytes()).unwrap();

    let report = analytics::detect_recurring(&db, date("2024-03-01"), 3, 2).unwrap();
    assert_eq!(report.recurring.len(), 1);
    assert_eq!(report.recurring[0].merchant, "Netflix");
    assert_eq!(report.recurring[0].avg_amount, 649.0);
}

#[test]
fn test_ledger_to_forecast_to_advice_workflow() {
    let db = Database::in_memory().unwrap();
    let csv = "Date,Amount,Description\n\
               2024-01-01,45000.00,Salary\n\
               2024-01-20,(38000.00),Expenses\n\
               2024-02-01,45000.00,Salary\n\
               2024-02-20,(41000.00),Expenses\n";
    ingest::import_ledger_csv(&db, csv.as_bytes()).unwrap();

    let history = db.list_ledger().unwrap();
    // (7000 + 4000) / 2
    let fc = forecast(
        &history,
        ForecastParams {
            current_balance: 50_000.0,
            horizon_years: 5,
            big_purchase: 100_000.0,
            expected_return_annual: 0.0,
            retirement_target: 5_000_000.0,
        },
    );
    assert_eq!(fc.avg_monthly_net, 5_500.0);
    // 50000 + 5500/mo reaches 100000 in month 10
    assert_eq!(fc.can_afford_in.map(|h| (h.years, h.months)), Some((0, 10)));

    let ctx = AdviceContext {
        forecast: Some(fc),
        ..Default::default()
    };
    let answer = RuleBasedAdvisor.answer("When can I afford the bike?", &ctx);
    assert!(answer.contains("0 years 10 months"), "{}", answer);
}

#[test]
fn test_forecast_is_stable_across_calls() {
    let db = Database::in_memory().unwrap();
    let csv = "Date,Amount,Description\n\
               2024-01-01,45000.00,Salary\n\
               2024-01-20,(38000.00),Expenses\n";
    ingest::import_ledger_csv(&db, csv.as_bytes()).unwrap();

    let history = db.list_ledger().unwrap();
    let params = ForecastParams::default();
    assert_eq!(forecast(&history, params), forecast(&history, params));
}

#[test]
fn test_reimport_does_not_change_aggregates() {
    let db = Database::in_memory().unwrap();
    let csv = "Date,Amount,Description\n\
               2024-01-10,500.00,Zomato dinner\n\
               2024-01-12,350.00,Uber to airport\n";

    ingest::import_csv(&db, csv.as_bytes()).unwrap();
    let before = analytics::category_totals(&db.query_month(2024, 1).unwrap());

    let summary = ingest::import_csv(&db, csv.as_bytes()).unwrap();
    assert_eq!(summary.duplicates, 2);

    let after = analytics::category_totals(&db.query_month(2024, 1).unwrap());
    assert_eq!(before, after);
}

#[test]
fn test_set_limit_flows_into_gauge() {
    let db = Database::in_memory().unwrap();
    db.set_monthly_limit(3000.0).unwrap();

    let csv = "Date,Amount,Description\n2024-01-10,2700.00,Amazon order\n";
    ingest::import_csv(&db, csv.as_bytes()).unwrap();

    let january = db.query_month(2024, 1).unwrap();
    let gauge = compute_gauge(&january, db.monthly_limit().unwrap());
    assert_eq!(gauge.percent, 90);
    assert_eq!(gauge.status, GaugeStatus::Red);
}
