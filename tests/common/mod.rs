#![allow(dead_code)]

use chrono::{Duration, Utc};
use sqlx::sqlite::SqlitePoolOptions;
use std::sync::Arc;
use uuid::Uuid;

use shortlife::application::services::{LinkService, LinkSettings};
use shortlife::domain::entities::NewLink;
use shortlife::domain::repositories::LinkRepository;
use shortlife::infrastructure::persistence::SqliteLinkRepository;
use shortlife::state::AppState;

pub const MAX_SHORT_LENGTH: usize = 16;

/// Opens a private in-memory database with the `links` table created.
pub async fn create_test_repository() -> Arc<SqliteLinkRepository> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .idle_timeout(None::<std::time::Duration>)
        .max_lifetime(None::<std::time::Duration>)
        .connect("sqlite::memory:")
        .await
        .unwrap();

    let repo = Arc::new(SqliteLinkRepository::new(
        Arc::new(pool),
        MAX_SHORT_LENGTH,
    ));
    repo.ensure_schema().await.unwrap();
    repo
}

pub fn create_test_state(repo: Arc<dyn LinkRepository>) -> AppState {
    create_test_state_with(repo, LinkSettings::default())
}

pub fn create_test_state_with(repo: Arc<dyn LinkRepository>, settings: LinkSettings) -> AppState {
    AppState::new(Arc::new(LinkService::new(repo, settings)))
}

pub fn new_link(short: &str, url: &str, expire_in: Duration) -> NewLink {
    let now = Utc::now();
    NewLink {
        id: Uuid::new_v4(),
        created_at: now,
        expire_at: now + expire_in,
        url: url.to_string(),
        short: short.to_string(),
        password_hash: None,
    }
}

pub async fn create_test_link(repo: &dyn LinkRepository, short: &str, url: &str) {
    repo.create(new_link(short, url, Duration::days(2)))
        .await
        .unwrap();
}

pub async fn create_expired_link(repo: &dyn LinkRepository, short: &str, url: &str) {
    repo.create(new_link(short, url, Duration::hours(-1)))
        .await
        .unwrap();
}
