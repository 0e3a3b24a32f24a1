mod common;

use axum::http::StatusCode;
use axum_test::TestServer;
use chrono::{DateTime, Duration, Utc};
use serde_json::json;
use shortlife::application::services::LinkSettings;
use shortlife::domain::repositories::LinkRepository;
use shortlife::infrastructure::persistence::SqliteLinkRepository;
use shortlife::routes::router;
use shortlife::utils::alias::Charset;
use std::sync::Arc;

async fn setup() -> (TestServer, Arc<SqliteLinkRepository>) {
    let repo = common::create_test_repository().await;
    let state = common::create_test_state(repo.clone());
    (TestServer::new(router(state)).unwrap(), repo)
}

#[tokio::test]
async fn test_create_link_with_generated_alias() {
    let (server, repo) = setup().await;

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "https://example.com/page" }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body = response.json::<serde_json::Value>();

    let short = body["short"].as_str().unwrap();
    assert_eq!(short.len(), 6);
    assert!(short.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(body["url"], "https://example.com/page");
    assert_eq!(body["password_protected"], false);

    assert_eq!(
        repo.get_url_by_short(short).await.unwrap(),
        "https://example.com/page"
    );
}

#[tokio::test]
async fn test_create_link_default_expiry_is_two_days() {
    let (server, _repo) = setup().await;

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "https://example.com" }))
        .await;

    let body = response.json::<serde_json::Value>();
    let created_at: DateTime<Utc> = serde_json::from_value(body["created_at"].clone()).unwrap();
    let expire_at: DateTime<Utc> = serde_json::from_value(body["expire_at"].clone()).unwrap();

    assert_eq!(expire_at - created_at, Duration::days(2));
}

#[tokio::test]
async fn test_create_link_with_options() {
    let (server, _repo) = setup().await;

    let response = server
        .post("/api/links")
        .json(&json!({
            "url": "http://example.com",
            "path": "apath",
            "expire_after": "1h",
            "password": "pass"
        }))
        .await;

    response.assert_status(StatusCode::CREATED);
    let body = response.json::<serde_json::Value>();

    assert_eq!(body["short"], "apath");
    assert_eq!(body["password_protected"], true);
    assert!(body.get("password").is_none());

    let created_at: DateTime<Utc> = serde_json::from_value(body["created_at"].clone()).unwrap();
    let expire_at: DateTime<Utc> = serde_json::from_value(body["expire_at"].clone()).unwrap();
    assert_eq!(expire_at - created_at, Duration::hours(1));
}

#[tokio::test]
async fn test_create_link_with_length() {
    let (server, _repo) = setup().await;

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "https://example.com", "length": 10 }))
        .await;

    let body = response.json::<serde_json::Value>();
    assert_eq!(body["short"].as_str().unwrap().len(), 10);
}

#[tokio::test]
async fn test_create_link_duplicate_custom_alias() {
    let (server, repo) = setup().await;
    common::create_test_link(repo.as_ref(), "taken", "https://first.com").await;

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "https://second.com", "path": "taken" }))
        .await;

    response.assert_status(StatusCode::CONFLICT);
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "conflict");

    assert_eq!(
        repo.get_url_by_short("taken").await.unwrap(),
        "https://first.com"
    );
}

#[tokio::test]
async fn test_create_link_invalid_url() {
    let (server, _repo) = setup().await;

    for url in ["ko", "hts://example.com", "ftp://example.com"] {
        let response = server
            .post("/api/links")
            .json(&json!({ "url": url }))
            .await;

        response.assert_status_bad_request();
        let body = response.json::<serde_json::Value>();
        assert_eq!(body["error"]["code"], "validation_error");
    }
}

#[tokio::test]
async fn test_create_link_reserved_alias() {
    let (server, _repo) = setup().await;

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "https://example.com", "path": "health" }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_create_link_bad_expiry() {
    let (server, _repo) = setup().await;

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "https://example.com", "expire_after": "tomorrow" }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_create_link_malformed_body() {
    let (server, repo) = setup().await;

    let response = server.post("/api/links").text("{\"url\": ").await;

    response.assert_status_bad_request();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "validation_error");

    assert!(repo.list().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_link_type_mismatch() {
    let (server, _repo) = setup().await;

    let response = server
        .post("/api/links")
        .json(&json!({ "url": "https://example.com", "length": "six" }))
        .await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_create_link_alias_space_exhausted() {
    let repo = common::create_test_repository().await;
    let settings = LinkSettings {
        charset: Charset::new("a").unwrap(),
        ..LinkSettings::default()
    };
    let state = common::create_test_state_with(repo.clone(), settings);
    let server = TestServer::new(router(state)).unwrap();

    let first = server
        .post("/api/links")
        .json(&json!({ "url": "https://example.com", "length": 1 }))
        .await;
    first.assert_status(StatusCode::CREATED);

    let second = server
        .post("/api/links")
        .json(&json!({ "url": "https://example.com", "length": 1 }))
        .await;

    second.assert_status(StatusCode::SERVICE_UNAVAILABLE);
    let body = second.json::<serde_json::Value>();
    assert_eq!(body["error"]["code"], "capacity_exhausted");
    assert_eq!(repo.list().await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_list_links() {
    let (server, repo) = setup().await;
    common::create_test_link(repo.as_ref(), "one", "https://one.com").await;
    common::create_expired_link(repo.as_ref(), "two", "https://two.com").await;

    let response = server.get("/api/links").await;

    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["total"], 2);
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_list_links_empty() {
    let (server, _repo) = setup().await;

    let response = server.get("/api/links").await;

    response.assert_status_ok();
    let body = response.json::<serde_json::Value>();
    assert_eq!(body["total"], 0);
    assert!(body["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_link() {
    let (server, repo) = setup().await;
    common::create_test_link(repo.as_ref(), "bye", "https://example.com").await;

    let response = server.delete("/api/links/bye").await;

    response.assert_status(StatusCode::NO_CONTENT);
    assert!(repo.list().await.unwrap().is_empty());

    let redirect = server.get("/bye").await;
    redirect.assert_status_not_found();
}

#[tokio::test]
async fn test_delete_missing_link_succeeds() {
    let (server, _repo) = setup().await;

    let first = server.delete("/api/links/nothing").await;
    first.assert_status(StatusCode::NO_CONTENT);

    let second = server.delete("/api/links/nothing").await;
    second.assert_status(StatusCode::NO_CONTENT);
}
