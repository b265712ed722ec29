//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use chrono::NaiveDate;
use http_body_util::BodyExt;
use spendlens_core::db::Database;
use spendlens_core::models::{NewExpense, NewUser};
use spendlens_core::FixedClock;
use tower::ServiceExt;

const TEST_KEY: &str = "test-api-key-0123456789";

fn test_db() -> Database {
    let db = Database::in_memory().unwrap();
    db.seed_default_categories().unwrap();
    db
}

fn app_with(db: Database, config: ServerConfig) -> Router {
    let clock = FixedClock(NaiveDate::from_ymd_opt(2026, 6, 1).unwrap());
    create_router_with_clock(db, None, config, Arc::new(clock))
}

fn setup_test_app() -> Router {
    setup_test_app_with_db(test_db())
}

fn setup_test_app_with_db(db: Database) -> Router {
    let config = ServerConfig {
        require_auth: false,
        ..Default::default()
    };
    app_with(db, config)
}

fn setup_secure_app() -> Router {
    let config = ServerConfig {
        require_auth: true,
        api_keys: vec![TEST_KEY.to_string()],
        ..Default::default()
    };
    app_with(test_db(), config)
}

fn seed_sample(db: &Database) {
    for (amount, category, date) in [
        (50.0, "Food", "2026-01-10"),
        (150.0, "Food", "2026-02-03"),
        (20.0, "Transportation", "2026-02-20"),
    ] {
        db.create_expense(&NewExpense::new(
            amount,
            category,
            None,
            NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
        ))
        .unwrap();
    }
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn get_body_text(response: axum::response::Response) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(serde_json::to_string(&body).unwrap()))
        .unwrap()
}

// ========== Health & Auth ==========

#[tokio::test]
async fn test_health() {
    let app = setup_test_app();
    let response = app.oneshot(get("/api/health")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["status"], "ok");
}

#[tokio::test]
async fn test_security_headers_present() {
    let app = setup_test_app();
    let response = app.oneshot(get("/api/health")).await.unwrap();

    let headers = response.headers();
    assert_eq!(headers["x-content-type-options"], "nosniff");
    assert_eq!(headers["x-frame-options"], "DENY");
    assert!(headers.contains_key("content-security-policy"));
}

#[tokio::test]
async fn test_protected_route_requires_api_key() {
    let app = setup_secure_app();
    let response = app.oneshot(get("/api/expenses")).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Authentication required");
}

#[tokio::test]
async fn test_wrong_api_key_rejected() {
    let app = setup_secure_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/expenses")
                .header("authorization", "Bearer not-the-key")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_valid_api_key_accepted() {
    let app = setup_secure_app();
    let response = app
        .oneshot(
            Request::builder()
                .uri("/api/expenses")
                .header("authorization", format!("Bearer {}", TEST_KEY))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn test_public_routes_skip_auth() {
    let app = setup_secure_app();
    let response = app.clone().oneshot(get("/api/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .oneshot(post_json("/api/auth/signin", serde_json::json!({})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_signin() {
    let db = test_db();
    db.create_user(&NewUser::new("Jane Doe", "jane@example.com", "Password123!"))
        .unwrap();
    let app = setup_test_app_with_db(db);

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/signin",
            serde_json::json!({"email": "Jane@Example.com", "password": "Password123!"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["user"]["email"], "jane@example.com");
    assert_eq!(json["user"]["full_name"], "Jane Doe");
    assert!(json["user"]["id"].as_i64().unwrap() > 0);
    assert!(json["user"].get("password_hash").is_none());

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/auth/signin",
            serde_json::json!({"email": "jane@example.com", "password": "wrong-password"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Invalid credentials");

    let response = app
        .oneshot(post_json(
            "/api/auth/signin",
            serde_json::json!({"email": "jane@example.com"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Email and password are required");
}

// ========== Expenses ==========

#[tokio::test]
async fn test_create_and_list_expenses() {
    let app = setup_test_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/expenses",
            serde_json::json!({
                "amount": 12.5,
                "category": "Food",
                "description": "Lunch",
                "date": "2026-03-14"
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = get_body_json(response).await;
    assert_eq!(created["amount"], 12.5);
    assert_eq!(created["category"], "Food");
    assert_eq!(created["date"], "2026-03-14");

    // Form-style string amount, no description
    let response = app
        .clone()
        .oneshot(post_json(
            "/api/expenses",
            serde_json::json!({"amount": "40", "category": "Shopping", "date": "2026-04-01"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let created = get_body_json(response).await;
    assert_eq!(created["description"], "");

    let response = app.oneshot(get("/api/expenses")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    let list = json.as_array().unwrap();
    assert_eq!(list.len(), 2);
    // Newest first
    assert_eq!(list[0]["date"], "2026-04-01");
}

#[tokio::test]
async fn test_list_expenses_filter_and_order() {
    let db = test_db();
    seed_sample(&db);
    let app = setup_test_app_with_db(db);

    let response = app
        .clone()
        .oneshot(get("/api/expenses?category=Food&order=asc"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    let list = json.as_array().unwrap();
    assert_eq!(list.len(), 2);
    assert_eq!(list[0]["date"], "2026-01-10");

    let response = app
        .oneshot(get("/api/expenses?order=sideways"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_expense_missing_fields() {
    let app = setup_test_app();

    for body in [
        serde_json::json!({"category": "Food", "date": "2026-03-14"}),
        serde_json::json!({"amount": 5, "date": "2026-03-14"}),
        serde_json::json!({"amount": 5, "category": "Food"}),
        serde_json::json!({"amount": "", "category": "Food", "date": "2026-03-14"}),
    ] {
        let response = app
            .clone()
            .oneshot(post_json("/api/expenses", body))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = get_body_json(response).await;
        assert_eq!(json["error"], "Missing required fields");
    }
}

#[tokio::test]
async fn test_create_expense_bad_amount() {
    let app = setup_test_app();

    for amount in [
        serde_json::json!(0),
        serde_json::json!(-10),
        serde_json::json!("abc"),
    ] {
        let response = app
            .clone()
            .oneshot(post_json(
                "/api/expenses",
                serde_json::json!({"amount": amount, "category": "Food", "date": "2026-03-14"}),
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let json = get_body_json(response).await;
        assert_eq!(json["error"], "Amount must be a positive number");
    }
}

#[tokio::test]
async fn test_create_expense_bad_date() {
    let app = setup_test_app();
    let response = app
        .oneshot(post_json(
            "/api/expenses",
            serde_json::json!({"amount": 5, "category": "Food", "date": "14/03/2026"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_delete_expense() {
    let db = test_db();
    seed_sample(&db);
    let id = db.list_expenses(&Default::default()).unwrap()[0].id;
    let app = setup_test_app_with_db(db);

    let delete = |id: i64| {
        Request::builder()
            .method("DELETE")
            .uri(format!("/api/expenses/{}", id))
            .body(Body::empty())
            .unwrap()
    };

    let response = app.clone().oneshot(delete(id)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["message"], "Expense deleted successfully");

    let response = app.oneshot(delete(id)).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    let json = get_body_json(response).await;
    assert_eq!(json["error"], "Expense not found");
}

#[tokio::test]
async fn test_export_expenses_csv() {
    let db = test_db();
    seed_sample(&db);
    let app = setup_test_app_with_db(db);

    let response = app.oneshot(get("/api/expenses/export")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        response.headers()["content-type"],
        "text/csv; charset=utf-8"
    );
    assert!(response.headers()["content-disposition"]
        .to_str()
        .unwrap()
        .contains("expense_data.csv"));

    let body = get_body_text(response).await;
    let lines: Vec<_> = body.lines().collect();
    assert_eq!(lines[0], "Date,Amount,Category,Description");
    assert_eq!(lines.len(), 4);
}

// ========== Categories ==========

#[tokio::test]
async fn test_list_categories() {
    let app = setup_test_app();
    let response = app.oneshot(get("/api/categories")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    let categories = json.as_array().unwrap();
    assert_eq!(categories.len(), 6);
    assert_eq!(categories[0]["name"], "Food");
    assert_eq!(categories[0]["color"], "bg-red-500");
}

#[tokio::test]
async fn test_create_category() {
    let app = setup_test_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/categories",
            serde_json::json!({"name": "Travel", "color": "bg-cyan-500"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["name"], "Travel");

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/categories",
            serde_json::json!({"name": "Food", "color": "bg-red-500"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let response = app
        .oneshot(post_json(
            "/api/categories",
            serde_json::json!({"name": "  ", "color": "bg-red-500"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ========== Reports ==========

#[tokio::test]
async fn test_summary() {
    let db = test_db();
    seed_sample(&db);
    let app = setup_test_app_with_db(db);

    // Year defaults to the clock's year (2026)
    let response = app.clone().oneshot(get("/api/summary")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert_eq!(json["year"], 2026);
    assert_eq!(json["total"], 220.0);
    assert_eq!(json["count"], 3);
    assert_eq!(json["categories"][0]["name"], "Food");
    assert_eq!(json["categories"][0]["amount"], 200.0);
    assert_eq!(json["categories"][0]["color"], "#ef4444");
    assert_eq!(json["months"].as_array().unwrap().len(), 12);
    assert_eq!(json["months"][1]["month"], "Feb");
    assert_eq!(json["months"][1]["amount"], 170.0);

    let response = app.oneshot(get("/api/summary?year=2025")).await.unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["year"], 2025);
    assert_eq!(json["months"][1]["amount"], 0.0);
}

#[tokio::test]
async fn test_insights_seeded_are_reproducible() {
    let db = test_db();
    seed_sample(&db);
    db.create_expense(&NewExpense::new(
        1200.0,
        "Shopping",
        Some("Laptop"),
        NaiveDate::from_ymd_opt(2026, 3, 1).unwrap(),
    ))
    .unwrap();
    let app = setup_test_app_with_db(db);

    let request = || {
        Request::builder()
            .method("POST")
            .uri("/api/insights?seed=7")
            .body(Body::empty())
            .unwrap()
    };

    let first = get_body_json(app.clone().oneshot(request()).await.unwrap()).await;
    let second = get_body_json(app.oneshot(request()).await.unwrap()).await;
    assert_eq!(first, second);

    assert_eq!(first["headline_insights"].as_array().unwrap().len(), 4);
    assert_eq!(
        first["headline_insights"][0],
        "Your top spending category is Shopping at 1200.00$."
    );
    let anomalies = first["anomalies"].as_array().unwrap();
    assert_eq!(anomalies.len(), 2);
    assert_eq!(anomalies[0]["reason"], "Unusually high spending detected");
    assert_eq!(first["forecast"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_insights_empty() {
    let app = setup_test_app();
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/insights")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert!(json["anomalies"].as_array().unwrap().is_empty());
    assert!(json["forecast"].as_array().unwrap().is_empty());
}

// ========== Audit ==========

#[tokio::test]
async fn test_audit_log_records_access() {
    let app = setup_test_app();

    app.clone().oneshot(get("/api/expenses")).await.unwrap();
    let response = app.oneshot(get("/api/audit?limit=10")).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    let entries = json.as_array().unwrap();
    assert!(entries
        .iter()
        .any(|e| e["action"] == "list" && e["entity_type"] == "expense"));
    assert!(entries.iter().all(|e| e["user_email"] == "local-dev"));
}

#[tokio::test]
async fn test_audit_ignores_bearer_header_without_auth() {
    let app = setup_test_app();

    let request = Request::builder()
        .uri("/api/expenses")
        .header("authorization", "Bearer unchecked-key")
        .body(Body::empty())
        .unwrap();
    app.clone().oneshot(request).await.unwrap();

    let response = app.oneshot(get("/api/audit")).await.unwrap();
    let json = get_body_json(response).await;
    let entries = json.as_array().unwrap();
    assert!(!entries.is_empty());
    assert!(entries.iter().all(|e| e["user_email"] == "local-dev"));
}

#[tokio::test]
async fn test_audit_records_api_key_caller() {
    let app = setup_secure_app();
    let authed = |uri: &str| {
        Request::builder()
            .uri(uri)
            .header("authorization", format!("Bearer {}", TEST_KEY))
            .body(Body::empty())
            .unwrap()
    };

    app.clone().oneshot(authed("/api/expenses")).await.unwrap();
    let response = app.oneshot(authed("/api/audit")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = get_body_json(response).await;
    assert!(json
        .as_array()
        .unwrap()
        .iter()
        .any(|e| e["user_email"] == "api-key"));
}

// ========== Helpers ==========

#[test]
fn test_validate_api_key() {
    let keys = vec!["alpha".to_string(), "bravo-key".to_string()];
    assert!(validate_api_key("alpha", &keys));
    assert!(validate_api_key("bravo-key", &keys));
    assert!(!validate_api_key("alph", &keys));
    assert!(!validate_api_key("", &keys));
    assert!(!validate_api_key("alpha", &[]));
}

#[test]
fn test_parse_api_keys() {
    assert_eq!(
        parse_api_keys(" one, two ,,three "),
        vec!["one".to_string(), "two".to_string(), "three".to_string()]
    );
    assert!(parse_api_keys("").is_empty());
}

#[test]
fn test_get_user_email_respects_auth_mode() {
    let mut headers = axum::http::HeaderMap::new();
    headers.insert("authorization", "Bearer some-key".parse().unwrap());

    let secure = ServerConfig::default();
    assert_eq!(get_user_email(&secure, &headers), "api-key");

    let open = ServerConfig {
        require_auth: false,
        ..Default::default()
    };
    assert_eq!(get_user_email(&open, &headers), "local-dev");
    assert_eq!(
        get_user_email(&secure, &axum::http::HeaderMap::new()),
        "local-dev"
    );
}
