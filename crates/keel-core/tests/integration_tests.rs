//! Integration tests for keel-core
//!
//! These tests exercise the full onboard → import → insights → summary
//! workflow.

use keel_core::{
    db::Database,
    import::import_records,
    insights::{AnalysisContext, InsightCategory, InsightEngine, Severity},
    models::{Category, Currency, NewFinanceRecord, NewProfile, RecordSource},
    stats::build_summary,
};

/// Helper to create a balanced test sheet
/// Three income streams, diversified outflows and assets, modest debt:
/// every analyzer should come back Neutral.
fn balanced_csv() -> &'static str {
    r#"category,label,amount,currency
inflow,Salary,4200,USD
inflow,Freelance work,800,USD
inflow,Dividends,150,USD
outflow,Rent,1400,USD
outflow,Groceries,450,USD
outflow,Utilities,180,USD
outflow,Transport,120,USD
asset,Checking account,3200,USD
asset,Brokerage,15000,USD
asset,Retirement fund,22000,USD
liability,Car loan,9000,USD
liability,Credit card,1200,USD"#
}

fn new_profile(db: &Database, username: &str, currency: Currency) -> i64 {
    db.create_profile(&NewProfile {
        username: username.to_string(),
        display_name: None,
        currency,
    })
    .expect("Failed to create profile")
}

fn add_record(db: &Database, profile_id: i64, category: Category, label: &str, amount: f64) {
    db.insert_record(
        profile_id,
        &NewFinanceRecord {
            category,
            label: label.to_string(),
            amount,
            currency: Currency::Usd,
            source: RecordSource::Manual,
            import_hash: None,
        },
    )
    .expect("Failed to insert record");
}

// =============================================================================
// Full Workflow Tests
// =============================================================================

#[test]
fn test_full_onboard_workflow() {
    let db = Database::in_memory().expect("Failed to create in-memory database");
    let profile_id = new_profile(&db, "alice", Currency::Usd);

    // Import the sheet
    let summary = import_records(&db, profile_id, balanced_csv().as_bytes(), Currency::Usd)
        .expect("Failed to import CSV");
    assert_eq!(summary.imported, 12);
    assert_eq!(summary.skipped, 0);

    // Analyze
    let engine = InsightEngine::new();
    let ctx = AnalysisContext::new(&db, profile_id, Currency::Usd);
    let reports = engine.analyze_all(&ctx).expect("Failed to analyze");

    assert_eq!(reports.len(), 4);
    assert!(reports.iter().all(|r| r.severity == Severity::Neutral));

    // Sorted by warning level within equal severity
    assert_eq!(reports[0].category, InsightCategory::Liability);
    assert_eq!(reports[0].warning_level, 60);
    let inflow = reports
        .iter()
        .find(|r| r.category == InsightCategory::Inflow)
        .unwrap();
    assert_eq!(inflow.warning_level, 21);

    // Summarize
    let summary = build_summary(&db, profile_id, Currency::Usd).expect("Failed to summarize");
    assert_eq!(summary.record_count, 12);
    assert_eq!(summary.inflow_total, 5150.0);
    assert_eq!(summary.outflow_total, 2150.0);
    assert_eq!(summary.asset_total, 40200.0);
    assert_eq!(summary.liability_total, 10200.0);
    assert_eq!(summary.ratios.net_worth, 30000.0);
    assert!(summary.ratios.savings_ratio > 58.0 && summary.ratios.savings_ratio < 59.0);
}

#[test]
fn test_reimport_is_idempotent() {
    let db = Database::in_memory().expect("Failed to create in-memory database");
    let profile_id = new_profile(&db, "alice", Currency::Usd);

    import_records(&db, profile_id, balanced_csv().as_bytes(), Currency::Usd).unwrap();
    let second = import_records(&db, profile_id, balanced_csv().as_bytes(), Currency::Usd).unwrap();

    assert_eq!(second.imported, 0);
    assert_eq!(second.skipped, 12);

    let summary = build_summary(&db, profile_id, Currency::Usd).unwrap();
    assert_eq!(summary.record_count, 12);
}

#[test]
fn test_insights_flag_risky_profile() {
    let db = Database::in_memory().expect("Failed to create in-memory database");
    let profile_id = new_profile(&db, "bob", Currency::Usd);

    // One income stream fully consumed, one debt source, no assets
    add_record(&db, profile_id, Category::Inflow, "Salary", 1000.0);
    add_record(&db, profile_id, Category::Outflow, "Rent", 1000.0);
    add_record(&db, profile_id, Category::Liability, "Credit card", 5000.0);

    let engine = InsightEngine::new();
    let ctx = AnalysisContext::new(&db, profile_id, Currency::Usd);
    let reports = engine.analyze_all(&ctx).unwrap();

    assert_eq!(reports.len(), 4);

    let severe: Vec<_> = reports
        .iter()
        .filter(|r| r.severity == Severity::Severe)
        .collect();
    assert_eq!(severe.len(), 3);

    // Concentrated debt ranks first, then the single income stream
    assert_eq!(reports[0].category, InsightCategory::Liability);
    assert_eq!(reports[0].warning_level, 90);
    assert_eq!(reports[1].category, InsightCategory::Inflow);
    assert_eq!(reports[1].warning_level, 89);
    assert!(reports[1]
        .message
        .ends_with("(Only one stream of income detected.)"));
    assert_eq!(reports[2].category, InsightCategory::Asset);
    assert_eq!(reports[2].warning_level, 88);

    let outflow = reports
        .iter()
        .find(|r| r.category == InsightCategory::Outflow)
        .unwrap();
    assert_eq!(outflow.severity, Severity::Warning);
}

#[test]
fn test_multi_currency_summary() {
    let db = Database::in_memory().expect("Failed to create in-memory database");
    let profile_id = new_profile(&db, "eszter", Currency::Eur);

    db.insert_record(
        profile_id,
        &NewFinanceRecord {
            category: Category::Inflow,
            label: "US client".to_string(),
            amount: 1000.0,
            currency: Currency::Usd,
            source: RecordSource::Manual,
            import_hash: None,
        },
    )
    .unwrap();
    db.insert_record(
        profile_id,
        &NewFinanceRecord {
            category: Category::Inflow,
            label: "EU salary".to_string(),
            amount: 500.0,
            currency: Currency::Eur,
            source: RecordSource::Manual,
            import_hash: None,
        },
    )
    .unwrap();
    db.insert_record(
        profile_id,
        &NewFinanceRecord {
            category: Category::Outflow,
            label: "Rent".to_string(),
            amount: 800.0,
            currency: Currency::Eur,
            source: RecordSource::Manual,
            import_hash: None,
        },
    )
    .unwrap();

    let summary = build_summary(&db, profile_id, Currency::Eur).unwrap();
    assert_eq!(summary.currency, Currency::Eur);
    // 1000 USD converts at 0.91
    assert_eq!(summary.inflow_total, 1410.0);
    assert_eq!(summary.outflow_total, 800.0);
    assert!(summary.ratios.savings_ratio > 43.0 && summary.ratios.savings_ratio < 43.5);
}

#[test]
fn test_brand_new_profile_summarizes_to_zeros() {
    let db = Database::in_memory().expect("Failed to create in-memory database");
    let profile_id = new_profile(&db, "dora", Currency::Usd);

    let summary = build_summary(&db, profile_id, Currency::Usd).unwrap();
    assert_eq!(summary.record_count, 0);
    assert_eq!(summary.inflow_total, 0.0);
    assert_eq!(summary.outflow_total, 0.0);
    assert_eq!(summary.asset_total, 0.0);
    assert_eq!(summary.liability_total, 0.0);
    assert_eq!(summary.ratios.net_worth, 0.0);
    assert_eq!(summary.ratios.savings_ratio, 0.0);
    assert_eq!(summary.ratios.debt_to_asset, 0.0);
    // All-zero position still gets the baseline debt-free credit
    assert_eq!(summary.ratios.health_score, 30.0);
}

#[test]
fn test_profile_lifecycle() {
    let db = Database::in_memory().expect("Failed to create in-memory database");
    let profile_id = new_profile(&db, "carol", Currency::Usd);

    add_record(&db, profile_id, Category::Asset, "Savings", 2000.0);

    // Switch reporting currency, totals follow
    db.update_profile(profile_id, None, Some(Currency::Eur))
        .unwrap();
    let profile = db.get_profile(profile_id).unwrap().unwrap();
    assert_eq!(profile.currency, Currency::Eur);

    let summary = build_summary(&db, profile_id, profile.currency).unwrap();
    assert_eq!(summary.asset_total, 1820.0); // 2000 USD at 0.91

    db.delete_profile(profile_id).unwrap();
    assert!(db.get_profile(profile_id).unwrap().is_none());
    assert_eq!(db.count_records(profile_id).unwrap(), 0);
}
