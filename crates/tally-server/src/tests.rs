//! Server API tests

use super::*;
use axum::{
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use tally_core::db::Database;
use tally_core::models::{Budget, Transaction};
use tower::ServiceExt;

fn setup_test_app() -> Router {
    let db = Database::in_memory().unwrap();
    create_router(db, ServerConfig::default())
}

fn setup_seeded_app(config: ServerConfig) -> (Router, Database) {
    let db = Database::in_memory().unwrap();
    db.create_transaction(&Transaction::new(1000.0, "salary", "2025-01-01"))
        .unwrap();
    db.create_transaction(&Transaction::new(-200.0, "rent", "2025-01-02"))
        .unwrap();
    db.create_transaction(&Transaction::new(-50.0, "food", "2025-01-03"))
        .unwrap();
    db.create_budget(&Budget::monthly("rent", 100.0)).unwrap();
    (create_router(db.clone(), config), db)
}

async fn get_body_json(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body();
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
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

// ========== Config Tests ==========

#[test]
fn test_server_config_defaults() {
    let config = ServerConfig::from_lookup(|_| None);
    assert!(config.allowed_origins.is_empty());
    assert!(config.persist_chat);
}

#[test]
fn test_server_config_from_lookup() {
    let config = ServerConfig::from_lookup(|key| match key {
        CORS_ORIGINS_ENV => Some("http://localhost:3000, https://app.example.com,".to_string()),
        PERSIST_CHAT_ENV => Some("False".to_string()),
        _ => None,
    });
    assert_eq!(
        config.allowed_origins,
        vec!["http://localhost:3000", "https://app.example.com"]
    );
    assert!(!config.persist_chat);

    let on = ServerConfig::from_lookup(|key| (key == PERSIST_CHAT_ENV).then(|| "1".to_string()));
    assert!(on.persist_chat);
}

#[test]
fn test_list_query_clamps_limit() {
    assert_eq!(ListQuery { limit: 0 }.clamped_limit(), 1);
    assert_eq!(ListQuery { limit: -5 }.clamped_limit(), 1);
    assert_eq!(ListQuery { limit: 50 }.clamped_limit(), 50);
    assert_eq!(ListQuery { limit: 5000 }.clamped_limit(), MAX_PAGE_LIMIT);
}

// ========== Status Tests ==========

#[tokio::test]
async fn test_root() {
    let app = setup_test_app();

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["status"], "ok");
    assert_eq!(json["service"], "Personal Finance Assistant API");
}

#[tokio::test]
async fn test_storage_diagnostics() {
    let (app, _db) = setup_seeded_app(ServerConfig::default());

    let response = app.oneshot(get("/test")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["backend"], "✅ Running");
    assert_eq!(json["database"], "✅ Connected & Working");
    assert_eq!(json["database_name"], "tally_test");
    assert_eq!(json["connection_status"], "Connected");
    assert_eq!(json["collections"], serde_json::json!(["budget", "transaction"]));
}

// ========== Transaction API Tests ==========

#[tokio::test]
async fn test_create_and_list_transactions() {
    let db = Database::in_memory().unwrap();
    let app = create_router(db, ServerConfig::default());

    let body = serde_json::json!({
        "amount": -42.5,
        "category": "Groceries",
        "date": "2025-01-31",
        "notes": "weekly shop"
    });
    let response = app
        .clone()
        .oneshot(post_json("/api/transactions", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["ok"], true);
    let id = json["id"].as_i64().unwrap();

    let response = app.oneshot(get("/api/transactions")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], id);
    assert_eq!(items[0]["amount"], -42.5);
    assert_eq!(items[0]["category"], "Groceries");
    assert_eq!(items[0]["notes"], "weekly shop");
    assert!(items[0].get("account").is_none());
}

#[tokio::test]
async fn test_create_transaction_missing_field() {
    let app = setup_test_app();

    let body = serde_json::json!({ "amount": 10.0, "date": "2025-01-01" });
    let response = app
        .oneshot(post_json("/api/transactions", body))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_create_transaction_malformed_json() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/transactions")
                .header("content-type", "application/json")
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_list_transactions_limit() {
    let (app, _db) = setup_seeded_app(ServerConfig::default());

    let response = app
        .clone()
        .oneshot(get("/api/transactions?limit=2"))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["items"].as_array().unwrap().len(), 2);

    // Zero is clamped up to one
    let response = app
        .oneshot(get("/api/transactions?limit=0"))
        .await
        .unwrap();
    let json = get_body_json(response).await;
    assert_eq!(json["items"].as_array().unwrap().len(), 1);
}

// ========== Budget API Tests ==========

#[tokio::test]
async fn test_create_and_list_budgets() {
    let app = setup_test_app();

    let body = serde_json::json!({ "category": "rent", "amount": 100.0 });
    let response = app
        .clone()
        .oneshot(post_json("/api/budgets", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(get_body_json(response).await["ok"], true);

    let response = app.oneshot(get("/api/budgets")).await.unwrap();
    let json = get_body_json(response).await;
    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["category"], "rent");
    assert_eq!(items[0]["period"], "monthly");
}

#[tokio::test]
async fn test_create_budget_negative_amount() {
    let app = setup_test_app();

    let body = serde_json::json!({ "category": "rent", "amount": -5.0 });
    let response = app
        .clone()
        .oneshot(post_json("/api/budgets", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let json = get_body_json(response).await;
    assert!(json["error"].as_str().unwrap().contains("non-negative"));

    let response = app.oneshot(get("/api/budgets")).await.unwrap();
    let json = get_body_json(response).await;
    assert!(json["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_create_budget_unknown_period() {
    let app = setup_test_app();

    let body = serde_json::json!({ "category": "rent", "amount": 5.0, "period": "yearly" });
    let response = app.oneshot(post_json("/api/budgets", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// ========== Insight & Chat API Tests ==========

#[tokio::test]
async fn test_get_insights() {
    let (app, _db) = setup_seeded_app(ServerConfig::default());

    let response = app.oneshot(get("/api/insights")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(json["summary"]["income"], 1000.0);
    assert_eq!(json["summary"]["expense"], 250.0);
    assert_eq!(json["summary"]["net"], 750.0);
    assert_eq!(json["overs"][0]["category"], "rent");
    assert_eq!(json["overs"][0]["spent"], 200.0);
    assert_eq!(json["overs"][0]["budget"], 100.0);
    assert_eq!(json["tips"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn test_chat_summary() {
    let (app, _db) = setup_seeded_app(ServerConfig::default());

    let body = serde_json::json!({ "message": "show my summary" });
    let response = app.oneshot(post_json("/api/chat", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(
        json["reply"],
        "Here's your overview: Income $1000.00, Expenses $250.00, Net $750.00."
    );
    assert_eq!(json["insights"]["summary"]["net"], 750.0);
}

#[tokio::test]
async fn test_chat_default_reply_on_empty_store() {
    let app = setup_test_app();

    let body = serde_json::json!({ "message": "hello there", "history": [] });
    let response = app.oneshot(post_json("/api/chat", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(
        json["reply"],
        "I can summarize your finances, track budgets, and give tips. \
         Currently: income $0.00, expenses $0.00. Ask 'show budget' or 'give tips'."
    );
}

#[tokio::test]
async fn test_chat_persists_history() {
    let (app, db) = setup_seeded_app(ServerConfig::default());

    let body = serde_json::json!({ "message": "any budget problems?" });
    let response = app
        .clone()
        .oneshot(post_json("/api/chat", body))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let history = db.list_messages(10).unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].record.content, "any budget problems?");
    assert_eq!(
        history[1].record.content,
        "Over budget in rent: spent $200.00 vs budget $100.00."
    );

    let response = app.oneshot(get("/api/messages")).await.unwrap();
    let json = get_body_json(response).await;
    let items = json["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["role"], "user");
    assert_eq!(items[1]["role"], "assistant");
}

#[tokio::test]
async fn test_chat_without_persistence() {
    let config = ServerConfig {
        persist_chat: false,
        ..Default::default()
    };
    let (app, db) = setup_seeded_app(config);

    let body = serde_json::json!({ "message": "give me tips" });
    let response = app.oneshot(post_json("/api/chat", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert!(db.list_messages(10).unwrap().is_empty());
}

#[tokio::test]
async fn test_chat_replies_when_history_cannot_be_stored() {
    let (app, db) = setup_seeded_app(ServerConfig::default());
    db.conn()
        .unwrap()
        .execute_batch(
            "CREATE TRIGGER reject_messages BEFORE INSERT ON documents \
             WHEN NEW.collection = 'message' \
             BEGIN SELECT RAISE(ABORT, 'message writes disabled'); END;",
        )
        .unwrap();

    let body = serde_json::json!({ "message": "show my summary" });
    let response = app.oneshot(post_json("/api/chat", body)).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = get_body_json(response).await;
    assert_eq!(
        json["reply"],
        "Here's your overview: Income $1000.00, Expenses $250.00, Net $750.00."
    );
    assert!(db.list_messages(10).unwrap().is_empty());
}

#[tokio::test]
async fn test_chat_requires_message() {
    let app = setup_test_app();

    let body = serde_json::json!({ "history": [] });
    let response = app.oneshot(post_json("/api/chat", body)).await.unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

// ========== CORS Tests ==========

#[tokio::test]
async fn test_cors_allows_any_origin_by_default() {
    let app = setup_test_app();

    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header("origin", "http://example.com")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "*"
    );
}

#[tokio::test]
async fn test_cors_restricted_origins() {
    let config = ServerConfig {
        allowed_origins: vec!["http://localhost:3000".to_string()],
        ..Default::default()
    };
    let app = create_router(Database::in_memory().unwrap(), config);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .uri("/")
                .header("origin", "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(
        response.headers().get("access-control-allow-origin").unwrap(),
        "http://localhost:3000"
    );

    let response = app
        .oneshot(
            Request::builder()
                .uri("/")
                .header("origin", "http://evil.example")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert!(response.headers().get("access-control-allow-origin").is_none());
}
