mod common;

use chrono::{Duration, Utc};
use shortlife::domain::garbage_collector::GarbageCollector;
use shortlife::domain::repositories::LinkRepository;
use shortlife::error::AppError;
use shortlife::utils::password::{hash_password, verify_password};
use std::sync::Arc;

#[tokio::test]
async fn test_ensure_schema_is_idempotent() {
    let repo = common::create_test_repository().await;

    assert!(repo.ensure_schema().await.is_ok());
    assert!(repo.ensure_schema().await.is_ok());
}

#[tokio::test]
async fn test_create_link() {
    let repo = common::create_test_repository().await;

    let new_link = common::new_link("test123", "https://example.com", Duration::days(2));
    let expire_at = new_link.expire_at;

    let link = repo.create(new_link).await.unwrap();

    assert_eq!(link.short, "test123");
    assert_eq!(link.url, "https://example.com");
    assert_eq!(link.expire_at, expire_at);
    assert!(!link.is_protected());
}

#[tokio::test]
async fn test_create_duplicate_short_conflicts() {
    let repo = common::create_test_repository().await;
    common::create_test_link(repo.as_ref(), "dup", "https://first.com").await;

    let result = repo
        .create(common::new_link("dup", "https://second.com", Duration::days(2)))
        .await;

    assert!(matches!(result, Err(AppError::Conflict { .. })));

    let url = repo.get_url_by_short("dup").await.unwrap();
    assert_eq!(url, "https://first.com");
}

#[tokio::test]
async fn test_get_url_by_short() {
    let repo = common::create_test_repository().await;
    common::create_test_link(repo.as_ref(), "abc123", "https://example.com/page").await;

    let url = repo.get_url_by_short("abc123").await.unwrap();

    assert_eq!(url, "https://example.com/page");
}

#[tokio::test]
async fn test_get_url_by_short_not_found() {
    let repo = common::create_test_repository().await;

    let result = repo.get_url_by_short("missing").await;

    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[tokio::test]
async fn test_get_password_hash_unprotected() {
    let repo = common::create_test_repository().await;
    common::create_test_link(repo.as_ref(), "open", "https://example.com").await;

    let hash = repo.get_password_hash_by_short("open").await.unwrap();

    assert!(hash.is_none());
}

#[tokio::test]
async fn test_get_password_hash_protected() {
    let repo = common::create_test_repository().await;

    let stored = hash_password("hunter2").unwrap();
    let mut new_link = common::new_link("locked", "https://example.com", Duration::days(2));
    new_link.password_hash = Some(stored.clone());
    repo.create(new_link).await.unwrap();

    let hash = repo
        .get_password_hash_by_short("locked")
        .await
        .unwrap()
        .unwrap();

    assert_eq!(hash, stored);
    assert!(verify_password("hunter2", &hash));
}

#[tokio::test]
async fn test_get_password_hash_not_found() {
    let repo = common::create_test_repository().await;

    let result = repo.get_password_hash_by_short("missing").await;

    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[tokio::test]
async fn test_list_empty() {
    let repo = common::create_test_repository().await;

    let links = repo.list().await.unwrap();

    assert!(links.is_empty());
}

#[tokio::test]
async fn test_list_includes_expired() {
    let repo = common::create_test_repository().await;
    common::create_test_link(repo.as_ref(), "live", "https://live.com").await;
    common::create_expired_link(repo.as_ref(), "stale", "https://stale.com").await;

    let links = repo.list().await.unwrap();

    assert_eq!(links.len(), 2);
    let shorts: Vec<&str> = links.iter().map(|l| l.short.as_str()).collect();
    assert!(shorts.contains(&"live"));
    assert!(shorts.contains(&"stale"));
}

#[tokio::test]
async fn test_delete_by_short() {
    let repo = common::create_test_repository().await;
    common::create_test_link(repo.as_ref(), "gone", "https://example.com").await;

    repo.delete_by_short("gone").await.unwrap();

    let result = repo.get_url_by_short("gone").await;
    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[tokio::test]
async fn test_delete_missing_is_ok() {
    let repo = common::create_test_repository().await;

    assert!(repo.delete_by_short("never-existed").await.is_ok());
    assert!(repo.delete_by_short("never-existed").await.is_ok());
}

#[tokio::test]
async fn test_ping() {
    let repo = common::create_test_repository().await;

    assert!(repo.ping().await.is_ok());
}

#[tokio::test]
async fn test_sweep_removes_expired_and_keeps_live() {
    let repo = common::create_test_repository().await;
    common::create_expired_link(repo.as_ref(), "A", "https://a.com").await;
    common::create_test_link(repo.as_ref(), "B", "https://b.com").await;

    let collector = GarbageCollector::new(repo.clone(), std::time::Duration::from_secs(60));
    let report = collector.sweep(Utc::now()).await.unwrap();

    assert_eq!(report.scanned, 2);
    assert_eq!(report.deleted, 1);

    let remaining = repo.list().await.unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].short, "B");

    let result = repo.get_url_by_short("A").await;
    assert!(matches!(result, Err(AppError::NotFound { .. })));
}

#[tokio::test]
async fn test_repository_as_trait_object() {
    let repo: Arc<dyn LinkRepository> = common::create_test_repository().await;

    common::create_test_link(repo.as_ref(), "dyn", "https://example.com").await;

    assert_eq!(repo.list().await.unwrap().len(), 1);
}
