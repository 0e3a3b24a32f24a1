//! Repository trait for link storage.

use crate::domain::entities::{Link, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Storage accessor for links.
///
/// Each operation maps to exactly one persistence action. Concurrency safety
/// (alias uniqueness, atomic insert) is delegated to the backing store.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL
/// - [`crate::infrastructure::persistence::SqliteLinkRepository`] - SQLite
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Creates the `links` table if it does not exist yet.
    ///
    /// Safe to call on every startup.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the statement fails. Callers at
    /// startup must treat this as fatal.
    async fn ensure_schema(&self) -> Result<(), AppError>;

    /// Runs a trivial query to check connectivity.
    async fn ping(&self) -> Result<(), AppError>;

    /// Inserts a new link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if the alias already exists; the caller
    /// decides whether to regenerate and retry.
    ///
    /// Returns [`AppError::Internal`] on database errors.
    async fn create(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Fetches the target URL of an alias.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link uses this alias.
    async fn get_url_by_short(&self, short: &str) -> Result<String, AppError>;

    /// Fetches the stored password hash of an alias.
    ///
    /// `Ok(None)` means the link exists and has no password.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link uses this alias.
    async fn get_password_hash_by_short(&self, short: &str) -> Result<Option<String>, AppError>;

    /// Returns every stored link, oldest first. Empty when the table is empty.
    async fn list(&self) -> Result<Vec<Link>, AppError>;

    /// Deletes a link by alias.
    ///
    /// Deleting an alias that does not exist is not an error.
    async fn delete_by_short(&self, short: &str) -> Result<(), AppError>;
}
