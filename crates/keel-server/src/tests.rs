//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use keel_core::db::Database;
use keel_core::models::{Category, Currency, NewFinanceRecord, NewProfile, RecordSource};
use tower::ServiceExt;

fn test_config() -> ServerConfig {
    ServerConfig {
        require_auth: false,
        allowed_origins: vec![],
        ..Default::default()
    }
}

fn setup_test_app() -> Router {
    let db = Database::in_memory().unwrap();
    create_router(db, None, test_config())
}

fn seed_profile(db: &Database, username: &str, currency: Currency) -> i64 {
    db.create_profile(&NewProfile {
        username: username.to_string(),
        display_name: None,
        currency,
    })
    .unwrap()
}

fn seed_record(db: &Database, profile_id: i64, category: Category, label: &str, amount: f64) {
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
    .unwrap();
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

// ========== Profile API Tests ==========

#[tokio::test]
async fn test_list_profiles_empty() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/profiles")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert!(json.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_onboard_profile() {
    let app = setup_test_app();

    let body = serde_json::json!({
        "username": "alice",
        "display_name": "Alice",
        "currency": "EUR"
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/profiles")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["username"], "alice");
    assert_eq!(json["display_name"], "Alice");
    assert_eq!(json["currency"], "EUR");
    assert!(json["id"].as_i64().unwrap() > 0);
}

#[tokio::test]
async fn test_onboard_duplicate_username_conflict() {
    let db = Database::in_memory().unwrap();
    seed_profile(&db, "alice", Currency::Usd);
    let app = create_router(db, None, test_config());

    let body = serde_json::json!({ "username": "alice" });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/profiles")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn test_onboard_rejects_empty_username() {
    let app = setup_test_app();

    let body = serde_json::json!({ "username": "   " });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/profiles")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_onboard_rejects_unknown_currency() {
    let app = setup_test_app();

    let body = serde_json::json!({ "username": "bob", "currency": "GBP" });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/profiles")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_username_availability() {
    let db = Database::in_memory().unwrap();
    seed_profile(&db, "taken", Currency::Usd);
    let app = create_router(db, None, test_config());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/api/profiles/availability?username=free")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["available"], true);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/profiles/availability?username=taken")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let json = get_body_json(response).await;
    assert_eq!(json["available"], false);
}

#[tokio::test]
async fn test_get_profile_not_found() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/profiles/99999")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_update_profile_currency() {
    let db = Database::in_memory().unwrap();
    let profile_id = seed_profile(&db, "alice", Currency::Usd);
    let app = create_router(db, None, test_config());

    let body = serde_json::json!({ "currency": "HUF" });

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/profiles/{}", profile_id))
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["currency"], "HUF");
}

#[tokio::test]
async fn test_update_profile_no_fields() {
    let db = Database::in_memory().unwrap();
    let profile_id = seed_profile(&db, "alice", Currency::Usd);
    let app = create_router(db, None, test_config());

    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/profiles/{}", profile_id))
                .header("content-type", "application/json")
                .body(Body::from("{}"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_profile() {
    let db = Database::in_memory().unwrap();
    let profile_id = seed_profile(&db, "alice", Currency::Usd);
    seed_record(&db, profile_id, Category::Asset, "Savings", 1000.0);
    let app = create_router(db.clone(), None, test_config());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/profiles/{}", profile_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["success"], true);

    // Profile and records are gone
    assert!(db.get_profile(profile_id).unwrap().is_none());
    assert_eq!(db.count_records(profile_id).unwrap(), 0);

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/profiles/{}", profile_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ========== Record API Tests ==========

#[tokio::test]
async fn test_create_and_list_records() {
    let db = Database::in_memory().unwrap();
    let profile_id = seed_profile(&db, "alice", Currency::Eur);
    let app = create_router(db, None, test_config());

    let body = serde_json::json!({
        "category": "inflow",
        "label": "Salary",
        "amount": 4200.0
    });

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/profiles/{}/records", profile_id))
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["category"], "inflow");
    assert_eq!(json["label"], "Salary");
    assert_eq!(json["amount"], 4200.0);
    // No explicit currency falls back to the profile currency
    assert_eq!(json["currency"], "EUR");
    assert_eq!(json["source"], "manual");

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/profiles/{}/records", profile_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 1);

    // Category filter
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/profiles/{}/records?category=outflow", profile_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let json = get_body_json(response).await;
    assert!(json.as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_record_unknown_category() {
    let db = Database::in_memory().unwrap();
    let profile_id = seed_profile(&db, "alice", Currency::Usd);
    let app = create_router(db, None, test_config());

    let body = serde_json::json!({
        "category": "stocks",
        "label": "Brokerage",
        "amount": 100.0
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/profiles/{}/records", profile_id))
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_records_for_missing_profile() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/profiles/42/records")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_batch_insert() {
    let db = Database::in_memory().unwrap();
    let profile_id = seed_profile(&db, "alice", Currency::Usd);
    let app = create_router(db.clone(), None, test_config());

    let body = serde_json::json!({
        "inflows": [
            { "label": "Salary", "amount": 4000.0 },
            { "label": "", "amount": 0.0 }
        ],
        "outflows": [
            { "label": "Rent", "amount": 1400.0 }
        ],
        "liabilities": []
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/profiles/{}/records/batch", profile_id))
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["inserted"], 2);
    assert_eq!(db.count_records(profile_id).unwrap(), 2);
}

#[tokio::test]
async fn test_batch_insert_all_blank() {
    let db = Database::in_memory().unwrap();
    let profile_id = seed_profile(&db, "alice", Currency::Usd);
    let app = create_router(db, None, test_config());

    let body = serde_json::json!({
        "inflows": [{ "label": "", "amount": 0.0 }],
        "assets": []
    });

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/profiles/{}/records/batch", profile_id))
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = get_body_json(response).await;
    assert_eq!(json["error"], "no valid finance entries to insert");
}

#[tokio::test]
async fn test_update_and_delete_record() {
    let db = Database::in_memory().unwrap();
    let profile_id = seed_profile(&db, "alice", Currency::Usd);
    seed_record(&db, profile_id, Category::Outflow, "Rent", 1400.0);
    let record_id = db.list_records(profile_id, None).unwrap()[0].id;
    let app = create_router(db.clone(), None, test_config());

    let body = serde_json::json!({ "amount": 1500.0 });

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/records/{}", record_id))
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        db.get_record(record_id).unwrap().unwrap().amount,
        1500.0
    );

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/records/{}", record_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    // Second delete is a 404
    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/records/{}", record_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ========== Import API Tests ==========

fn multipart_csv_body(boundary: &str, csv: &str) -> String {
    format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"sheet.csv\"\r\nContent-Type: text/csv\r\n\r\n{csv}\r\n--{b}--\r\n",
        b = boundary,
        csv = csv
    )
}

#[tokio::test]
async fn test_import_csv() {
    let db = Database::in_memory().unwrap();
    let profile_id = seed_profile(&db, "alice", Currency::Usd);
    let app = create_router(db.clone(), None, test_config());

    let csv = "category,label,amount,currency\ninflow,Salary,4200,USD\noutflow,Rent,1400,USD\n";
    let boundary = "keel-test-boundary";

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/profiles/{}/import", profile_id))
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={}", boundary),
                )
                .body(Body::from(multipart_csv_body(boundary, csv)))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["imported"], 2);
    assert_eq!(json["skipped"], 0);

    // Re-import skips everything
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/profiles/{}/import", profile_id))
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={}", boundary),
                )
                .body(Body::from(multipart_csv_body(boundary, csv)))
                .unwrap(),
        )
        .await
        .unwrap();

    let json = get_body_json(response).await;
    assert_eq!(json["imported"], 0);
    assert_eq!(json["skipped"], 2);
}

#[tokio::test]
async fn test_import_missing_file_field() {
    let db = Database::in_memory().unwrap();
    let profile_id = seed_profile(&db, "alice", Currency::Usd);
    let app = create_router(db, None, test_config());

    let boundary = "keel-test-boundary";
    let body = format!(
        "--{b}\r\nContent-Disposition: form-data; name=\"other\"\r\n\r\nvalue\r\n--{b}--\r\n",
        b = boundary
    );

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/profiles/{}/import", profile_id))
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={}", boundary),
                )
                .body(Body::from(body))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_import_bad_row_reports_line() {
    let db = Database::in_memory().unwrap();
    let profile_id = seed_profile(&db, "alice", Currency::Usd);
    let app = create_router(db, None, test_config());

    let csv = "category,label,amount\ninflow,Salary,4200\nstocks,Brokerage,100\n";
    let boundary = "keel-test-boundary";

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/profiles/{}/import", profile_id))
                .header(
                    "content-type",
                    format!("multipart/form-data; boundary={}", boundary),
                )
                .body(Body::from(multipart_csv_body(boundary, csv)))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = get_body_json(response).await;
    let message = json["error"].as_str().unwrap();
    assert!(message.contains("Line 3"));
}

// ========== Insight API Tests ==========

#[tokio::test]
async fn test_insights_skip_unscoreable_categories() {
    let db = Database::in_memory().unwrap();
    let profile_id = seed_profile(&db, "alice", Currency::Usd);
    let app = create_router(db, None, test_config());

    // No records at all: the income analyzer has nothing to score and
    // is skipped; the other three still report.
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/profiles/{}/insights", profile_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let reports = json.as_array().unwrap();
    assert_eq!(reports.len(), 3);
    assert!(reports.iter().all(|r| r["category"] != "inflow"));

    // Missing assets rank worst
    assert_eq!(reports[0]["category"], "asset");
    assert_eq!(reports[0]["severity"], "severe");
}

#[tokio::test]
async fn test_insights_full_profile() {
    let db = Database::in_memory().unwrap();
    let profile_id = seed_profile(&db, "alice", Currency::Usd);
    seed_record(&db, profile_id, Category::Inflow, "Salary", 1000.0);
    seed_record(&db, profile_id, Category::Outflow, "Rent", 1000.0);
    seed_record(&db, profile_id, Category::Asset, "Savings", 2000.0);
    seed_record(&db, profile_id, Category::Liability, "Credit card", 5000.0);
    let app = create_router(db, None, test_config());

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/profiles/{}/insights", profile_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let reports = json.as_array().unwrap();
    assert_eq!(reports.len(), 4);

    // Concentrated debt first, then the single income stream
    assert_eq!(reports[0]["category"], "liability");
    assert_eq!(reports[0]["severity"], "severe");
    assert_eq!(reports[0]["warning_level"], 90);
    assert_eq!(reports[1]["category"], "inflow");
    assert_eq!(reports[1]["warning_level"], 89);

    for report in reports {
        assert!(report.get("message").is_some());
        assert!(report["warning_level"].as_u64().unwrap() <= 100);
    }
}

#[tokio::test]
async fn test_category_insight_insufficient_data() {
    let db = Database::in_memory().unwrap();
    let profile_id = seed_profile(&db, "alice", Currency::Usd);
    let app = create_router(db, None, test_config());

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/profiles/{}/insights/inflow", profile_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_category_insight_unknown_category() {
    let db = Database::in_memory().unwrap();
    let profile_id = seed_profile(&db, "alice", Currency::Usd);
    let app = create_router(db, None, test_config());

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/profiles/{}/insights/stonks", profile_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_category_insight_no_analyzer() {
    let db = Database::in_memory().unwrap();
    let profile_id = seed_profile(&db, "alice", Currency::Usd);
    let app = create_router(db, None, test_config());

    // "general" parses as a category but has no registered analyzer
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/profiles/{}/insights/general", profile_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

// ========== Summary API Tests ==========

#[tokio::test]
async fn test_summary() {
    let db = Database::in_memory().unwrap();
    let profile_id = seed_profile(&db, "alice", Currency::Usd);
    seed_record(&db, profile_id, Category::Inflow, "Salary", 1000.0);
    seed_record(&db, profile_id, Category::Outflow, "Rent", 1000.0);
    seed_record(&db, profile_id, Category::Asset, "Savings", 2000.0);
    seed_record(&db, profile_id, Category::Liability, "Credit card", 5000.0);
    let app = create_router(db, None, test_config());

    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/profiles/{}/summary", profile_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["currency"], "USD");
    assert_eq!(json["inflow_total"], 1000.0);
    assert_eq!(json["outflow_total"], 1000.0);
    assert_eq!(json["asset_total"], 2000.0);
    assert_eq!(json["liability_total"], 5000.0);
    assert_eq!(json["record_count"], 4);
    assert_eq!(json["ratios"]["net_worth"], -3000.0);
    assert_eq!(json["ratios"]["savings_ratio"], 0.0);
}

#[tokio::test]
async fn test_summary_currency_override() {
    let db = Database::in_memory().unwrap();
    let profile_id = seed_profile(&db, "alice", Currency::Usd);
    seed_record(&db, profile_id, Category::Inflow, "Salary", 1000.0);
    let app = create_router(db, None, test_config());

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri(format!("/api/profiles/{}/summary?currency=EUR", profile_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["currency"], "EUR");
    assert_eq!(json["inflow_total"], 910.0);

    // Unknown override is rejected
    let response = app
        .oneshot(
            Request::builder()
                .uri(format!("/api/profiles/{}/summary?currency=XYZ", profile_id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ========== Audit API Tests ==========

#[tokio::test]
async fn test_audit_log_records_mutations() {
    let db = Database::in_memory().unwrap();
    let app = create_router(db, None, test_config());

    let body = serde_json::json!({ "username": "alice" });

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/profiles")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/audit")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let entries = json.as_array().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0]["actor"], "local-dev");
    assert_eq!(entries[0]["action"], "onboard");
    assert_eq!(entries[0]["entity_type"], "profile");
}

#[tokio::test]
async fn test_audit_log_limit() {
    let db = Database::in_memory().unwrap();
    for i in 0..5 {
        db.log_audit("cli", "add_record", Some("record"), Some(i), None)
            .unwrap();
    }
    let app = create_router(db, None, test_config());

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/audit?limit=2")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let json = get_body_json(response).await;
    assert_eq!(json.as_array().unwrap().len(), 2);
}

// ========== Authentication Tests ==========

#[tokio::test]
async fn test_auth_required() {
    let db = Database::in_memory().unwrap();
    let config = ServerConfig {
        require_auth: true,
        allowed_origins: vec![],
        ..Default::default()
    };
    let app = create_router(db, None, config);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/profiles")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    // Should get 401 without a key
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_auth_with_api_key() {
    let db = Database::in_memory().unwrap();
    let config = ServerConfig {
        require_auth: true,
        allowed_origins: vec![],
        api_keys: vec!["test-key-12345".to_string()],
    };
    let app = create_router(db, None, config);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/profiles")
                .header("authorization", "Bearer test-key-12345")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_auth_rejects_wrong_api_key() {
    let db = Database::in_memory().unwrap();
    let config = ServerConfig {
        require_auth: true,
        allowed_origins: vec![],
        api_keys: vec!["test-key-12345".to_string()],
    };
    let app = create_router(db, None, config);

    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/profiles")
                .header("authorization", "Bearer wrong-key")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[test]
fn test_validate_api_key_constant_time() {
    let keys = vec!["secret-key-1".to_string(), "secret-key-2".to_string()];

    assert!(validate_api_key("secret-key-1", &keys));
    assert!(validate_api_key("secret-key-2", &keys));
    assert!(!validate_api_key("secret-key-3", &keys));
    // Length mismatch short-circuits without comparing
    assert!(!validate_api_key("short", &keys));
    assert!(!validate_api_key("", &keys));
    assert!(!validate_api_key("secret-key-1", &[]));
}
