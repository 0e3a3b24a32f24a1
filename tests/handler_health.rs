mod common;

use axum::http::StatusCode;
use axum::{Router, routing::get};
use axum_test::TestServer;
use shortlife::api::handlers::health_handler;
use shortlife::infrastructure::persistence::SqliteLinkRepository;
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;

#[tokio::test]
async fn test_health_check_success() {
    let repo = common::create_test_repository().await;
    let state = common::create_test_state(repo);
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status_ok();

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"]["database"]["status"], "ok");
    assert!(body["version"].is_string());
    assert!(body["checks"]["database"]["latency_ms"].is_u64());
    assert!(body["checks"]["database"].get("message").is_none());
}

#[tokio::test]
async fn test_health_check_database_down() {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    pool.close().await;

    let repo = Arc::new(SqliteLinkRepository::new(
        Arc::new(pool),
        common::MAX_SHORT_LENGTH,
    ));
    let state = common::create_test_state(repo);
    let app = Router::new()
        .route("/health", get(health_handler))
        .with_state(state);

    let server = TestServer::new(app).unwrap();

    let response = server.get("/health").await;

    response.assert_status(StatusCode::SERVICE_UNAVAILABLE);

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["status"], "degraded");
    assert_eq!(body["checks"]["database"]["status"], "error");
    assert!(body["checks"]["database"]["message"].is_string());
}
