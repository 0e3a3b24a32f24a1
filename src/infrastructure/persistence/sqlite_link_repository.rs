//! SQLite implementation of link repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::SqlitePool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// SQLite repository for link storage and retrieval.
///
/// Timestamps are stored as RFC 3339 text and ids as UUID blobs.
pub struct SqliteLinkRepository {
    pool: Arc<SqlitePool>,
    max_short_length: usize,
}

impl SqliteLinkRepository {
    pub fn new(pool: Arc<SqlitePool>, max_short_length: usize) -> Self {
        Self {
            pool,
            max_short_length,
        }
    }
}

#[async_trait]
impl LinkRepository for SqliteLinkRepository {
    async fn ensure_schema(&self) -> Result<(), AppError> {
        let statement = format!(
            r#"
            CREATE TABLE IF NOT EXISTS links (
                id BLOB PRIMARY KEY,
                created_at TIMESTAMP NOT NULL,
                expire_at TIMESTAMP NOT NULL,
                url TEXT NOT NULL,
                short VARCHAR({}) UNIQUE NOT NULL,
                password VARCHAR(97)
            )
            "#,
            self.max_short_length
        );

        sqlx::query(&statement)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1").execute(self.pool.as_ref()).await?;
        Ok(())
    }

    async fn create(&self, new_link: NewLink) -> Result<Link, AppError> {
        sqlx::query(
            r#"
            INSERT INTO links (id, created_at, expire_at, url, short, password)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(new_link.id)
        .bind(new_link.created_at)
        .bind(new_link.expire_at)
        .bind(&new_link.url)
        .bind(&new_link.short)
        .bind(&new_link.password_hash)
        .execute(self.pool.as_ref())
        .await?;

        Ok(new_link.into_link())
    }

    async fn get_url_by_short(&self, short: &str) -> Result<String, AppError> {
        sqlx::query_scalar::<_, String>("SELECT url FROM links WHERE short = ?")
            .bind(short)
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "short": short })))
    }

    async fn get_password_hash_by_short(&self, short: &str) -> Result<Option<String>, AppError> {
        sqlx::query_scalar::<_, Option<String>>("SELECT password FROM links WHERE short = ?")
            .bind(short)
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "short": short })))
    }

    async fn list(&self) -> Result<Vec<Link>, AppError> {
        let links = sqlx::query_as::<_, Link>(
            r#"
            SELECT id, created_at, expire_at, url, short, password
            FROM links
            ORDER BY created_at
            "#,
        )
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(links)
    }

    async fn delete_by_short(&self, short: &str) -> Result<(), AppError> {
        sqlx::query("DELETE FROM links WHERE short = ?")
            .bind(short)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
