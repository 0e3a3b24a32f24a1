//! SQL repository implementations and connection bootstrap.
//!
//! # Repositories
//!
//! - [`PgLinkRepository`] - PostgreSQL
//! - [`SqliteLinkRepository`] - SQLite (file or in-memory)
//!
//! [`connect`] picks the backend from [`DatabaseKind`] and returns it behind
//! the [`LinkRepository`] trait.

pub mod pg_link_repository;
pub mod sqlite_link_repository;

pub use pg_link_repository::PgLinkRepository;
pub use sqlite_link_repository::SqliteLinkRepository;

use anyhow::{Context, Result};
use sqlx::postgres::PgPoolOptions;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use crate::config::{Config, DatabaseKind};
use crate::domain::repositories::LinkRepository;

/// Opens a connection pool for the configured backend.
///
/// # Errors
///
/// Returns an error if the connection string is invalid or the database
/// cannot be reached.
pub async fn connect(config: &Config) -> Result<Arc<dyn LinkRepository>> {
    let connect_timeout = Duration::from_secs(config.db_connect_timeout);
    let idle_timeout = Duration::from_secs(config.db_idle_timeout);
    let max_lifetime = Duration::from_secs(config.db_max_lifetime);

    match config.database_kind {
        DatabaseKind::Postgres => {
            let pool = PgPoolOptions::new()
                .max_connections(config.db_max_connections)
                .acquire_timeout(connect_timeout)
                .idle_timeout(idle_timeout)
                .max_lifetime(max_lifetime)
                .connect(&config.database_url)
                .await
                .context("Failed to connect to PostgreSQL")?;

            Ok(Arc::new(PgLinkRepository::new(
                Arc::new(pool),
                config.max_short_length,
            )))
        }
        DatabaseKind::Sqlite => {
            let options = SqliteConnectOptions::from_str(&config.database_url)
                .context("Invalid SQLite connection string")?
                .create_if_missing(true);

            // Every connection to `:memory:` opens its own database, so keep
            // exactly one alive for the lifetime of the pool.
            let pool_options = if is_in_memory(&config.database_url) {
                SqlitePoolOptions::new()
                    .max_connections(1)
                    .min_connections(1)
                    .idle_timeout(None::<Duration>)
                    .max_lifetime(None::<Duration>)
            } else {
                SqlitePoolOptions::new()
                    .max_connections(config.db_max_connections)
                    .idle_timeout(idle_timeout)
                    .max_lifetime(max_lifetime)
            };

            let pool = pool_options
                .acquire_timeout(connect_timeout)
                .connect_with(options)
                .await
                .context("Failed to open SQLite database")?;

            Ok(Arc::new(SqliteLinkRepository::new(
                Arc::new(pool),
                config.max_short_length,
            )))
        }
    }
}

fn is_in_memory(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}
