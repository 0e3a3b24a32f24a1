//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;

/// PostgreSQL repository for link storage and retrieval.
///
/// Uses bound parameters for every value; the only formatted SQL is the
/// table definition, whose alias width comes from configuration.
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
    max_short_length: usize,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    ///
    /// `max_short_length` sizes the `short` column when the table is created.
    pub fn new(pool: Arc<PgPool>, max_short_length: usize) -> Self {
        Self {
            pool,
            max_short_length,
        }
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn ensure_schema(&self) -> Result<(), AppError> {
        let statement = format!(
            r#"
            CREATE TABLE IF NOT EXISTS links (
                id UUID PRIMARY KEY,
                created_at TIMESTAMPTZ NOT NULL,
                expire_at TIMESTAMPTZ NOT NULL,
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
        let link = sqlx::query_as::<_, Link>(
            r#"
            INSERT INTO links (id, created_at, expire_at, url, short, password)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, created_at, expire_at, url, short, password
            "#,
        )
        .bind(new_link.id)
        .bind(new_link.created_at)
        .bind(new_link.expire_at)
        .bind(&new_link.url)
        .bind(&new_link.short)
        .bind(&new_link.password_hash)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(link)
    }

    async fn get_url_by_short(&self, short: &str) -> Result<String, AppError> {
        sqlx::query_scalar::<_, String>("SELECT url FROM links WHERE short = $1")
            .bind(short)
            .fetch_optional(self.pool.as_ref())
            .await?
            .ok_or_else(|| AppError::not_found("Short link not found", json!({ "short": short })))
    }

    async fn get_password_hash_by_short(&self, short: &str) -> Result<Option<String>, AppError> {
        sqlx::query_scalar::<_, Option<String>>("SELECT password FROM links WHERE short = $1")
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
        sqlx::query("DELETE FROM links WHERE short = $1")
            .bind(short)
            .execute(self.pool.as_ref())
            .await?;

        Ok(())
    }
}
