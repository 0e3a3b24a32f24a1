//! Link lifecycle service: creation, resolution, listing and deletion.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use serde_json::json;
use tracing::{debug, info};
use uuid::Uuid;

use crate::api::dto::parameters::Parameters;
use crate::domain::entities::{Link, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::alias::{
    Charset, generate_alias, is_reserved_alias, validate_custom_alias, validate_url,
};
use crate::utils::expiry::parse_expire_after;
use crate::utils::password::{hash_password, verify_password};

/// How many random aliases are tried before giving up on a creation.
pub const MAX_ALIAS_ATTEMPTS: usize = 8;

/// Tunables for link creation, resolved once from configuration.
#[derive(Debug, Clone)]
pub struct LinkSettings {
    /// Alias length used when the request does not ask for one.
    pub default_length: usize,
    /// Upper bound for generated and custom aliases (the `short` column width).
    pub max_length: usize,
    pub default_expiry: chrono::Duration,
    /// `None` means any positive expiry is accepted.
    pub max_expiry: Option<chrono::Duration>,
    pub charset: Charset,
    /// Deadline applied to each storage round-trip.
    pub request_timeout: Duration,
}

impl Default for LinkSettings {
    fn default() -> Self {
        Self {
            default_length: 6,
            max_length: 16,
            default_expiry: chrono::Duration::days(2),
            max_expiry: None,
            charset: Charset::default(),
            request_timeout: Duration::from_secs(5),
        }
    }
}

/// Service for creating and resolving short links.
///
/// Stateless apart from the shared repository: every method is safe to call
/// concurrently from many request handlers.
pub struct LinkService {
    repository: Arc<dyn LinkRepository>,
    settings: LinkSettings,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(repository: Arc<dyn LinkRepository>, settings: LinkSettings) -> Self {
        Self {
            repository,
            settings,
        }
    }

    /// Creates a link from decoded request parameters.
    ///
    /// # Alias selection
    ///
    /// - With a custom `path`, the alias is validated and inserted once. If it
    ///   is already taken the conflict is returned to the caller.
    /// - Otherwise a random alias of the requested (or default) length is
    ///   generated, retrying with a fresh alias on collision up to
    ///   [`MAX_ALIAS_ATTEMPTS`] times.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] for a bad URL, alias, length or expiry.
    /// Returns [`AppError::Conflict`] if the custom alias already exists.
    /// Returns [`AppError::CapacityExhausted`] when every generated alias collided.
    /// Returns [`AppError::Timeout`] or [`AppError::Internal`] on storage failures.
    pub async fn create_link(&self, params: Parameters) -> Result<Link, AppError> {
        let url = String::from(validate_url(&params.url)?);

        let expiry = self.resolve_expiry(params.expiry_offset())?;
        let password_hash = match params.plaintext_password() {
            Some(plaintext) => Some(hash_in_background(plaintext.to_string()).await?),
            None => None,
        };

        let created_at = Utc::now();
        let expire_at = created_at.checked_add_signed(expiry).ok_or_else(|| {
            AppError::bad_request(
                "Expiry is out of range",
                json!({ "expire_after_minutes": expiry.num_minutes() }),
            )
        })?;
        let new_link = |short: String| NewLink {
            id: Uuid::new_v4(),
            created_at,
            expire_at,
            url: url.clone(),
            short,
            password_hash: password_hash.clone(),
        };

        if let Some(path) = params.custom_path() {
            validate_custom_alias(path, self.settings.max_length)?;

            let link = self
                .insert(new_link(path.to_string()))
                .await
                .map_err(|e| {
                    if e.is_conflict() {
                        AppError::conflict("Alias already in use", json!({ "path": path }))
                    } else {
                        e
                    }
                })?;

            info!(short = %link.short, expire_at = %link.expire_at, "Created link with custom alias");
            return Ok(link);
        }

        let length = self.resolve_length(params.requested_length())?;

        for attempt in 1..=MAX_ALIAS_ATTEMPTS {
            let short = generate_alias(length, &self.settings.charset);
            if is_reserved_alias(&short) {
                debug!(attempt, short = %short, "Generated alias is reserved, regenerating");
                continue;
            }

            match self.insert(new_link(short)).await {
                Ok(link) => {
                    info!(short = %link.short, expire_at = %link.expire_at, "Created link");
                    return Ok(link);
                }
                Err(e) if e.is_conflict() => {
                    debug!(attempt, length, "Generated alias collided, regenerating");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::capacity_exhausted(
            "Failed to generate a unique alias",
            json!({ "length": length, "attempts": MAX_ALIAS_ATTEMPTS }),
        ))
    }

    /// Resolves an alias to its target URL.
    ///
    /// Protected links require `password` to verify against the stored hash.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link uses this alias.
    /// Returns [`AppError::Unauthorized`] if the link is protected and the
    /// password is missing or wrong.
    pub async fn resolve(&self, short: &str, password: Option<&str>) -> Result<String, AppError> {
        let stored_hash = self
            .with_deadline(
                "get_password_hash_by_short",
                self.repository.get_password_hash_by_short(short),
            )
            .await?;

        if let Some(hash) = stored_hash.filter(|h| !h.is_empty()) {
            let Some(supplied) = password.filter(|p| !p.is_empty()) else {
                return Err(AppError::unauthorized(
                    "Password required",
                    json!({ "short": short }),
                ));
            };

            if !verify_in_background(supplied.to_string(), hash).await? {
                return Err(AppError::unauthorized(
                    "Invalid password",
                    json!({ "short": short }),
                ));
            }
        }

        self.with_deadline("get_url_by_short", self.repository.get_url_by_short(short))
            .await
    }

    /// Lists every stored link.
    pub async fn list_links(&self) -> Result<Vec<Link>, AppError> {
        self.with_deadline("list", self.repository.list()).await
    }

    /// Deletes a link. Deleting an unknown alias succeeds.
    pub async fn delete_link(&self, short: &str) -> Result<(), AppError> {
        self.with_deadline("delete_by_short", self.repository.delete_by_short(short))
            .await?;
        info!(short, "Deleted link");
        Ok(())
    }

    /// Checks that the storage backend answers.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.with_deadline("ping", self.repository.ping()).await
    }

    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError> {
        self.with_deadline("create", self.repository.create(new_link))
            .await
    }

    fn resolve_expiry(&self, offset: Option<&str>) -> Result<chrono::Duration, AppError> {
        let expiry = match offset {
            Some(offset) => parse_expire_after(offset)?,
            None => self.settings.default_expiry,
        };

        if let Some(max) = self.settings.max_expiry
            && expiry > max
        {
            return Err(AppError::bad_request(
                "Expiry exceeds the allowed maximum",
                json!({
                    "expire_after_minutes": expiry.num_minutes(),
                    "max_minutes": max.num_minutes(),
                }),
            ));
        }

        Ok(expiry)
    }

    fn resolve_length(&self, requested: Option<usize>) -> Result<usize, AppError> {
        let length = requested.unwrap_or(self.settings.default_length);

        if length > self.settings.max_length {
            return Err(AppError::bad_request(
                format!("Alias length must be at most {}", self.settings.max_length),
                json!({ "length": length }),
            ));
        }

        Ok(length)
    }

    async fn with_deadline<T>(
        &self,
        operation: &'static str,
        fut: impl Future<Output = Result<T, AppError>>,
    ) -> Result<T, AppError> {
        tokio::time::timeout(self.settings.request_timeout, fut)
            .await
            .map_err(|_| {
                AppError::timeout(
                    "Storage operation timed out",
                    json!({
                        "operation": operation,
                        "timeout_ms": self.settings.request_timeout.as_millis() as u64,
                    }),
                )
            })?
    }
}

/// Argon2 is CPU-bound, keep it off the async workers.
async fn hash_in_background(plaintext: String) -> Result<String, AppError> {
    tokio::task::spawn_blocking(move || hash_password(&plaintext))
        .await
        .map_err(|e| {
            AppError::internal(
                "Password hashing task failed",
                json!({ "reason": e.to_string() }),
            )
        })?
        .map_err(|e| AppError::internal("Failed to hash password", json!({ "reason": e.to_string() })))
}

async fn verify_in_background(plaintext: String, hash: String) -> Result<bool, AppError> {
    tokio::task::spawn_blocking(move || verify_password(&plaintext, &hash))
        .await
        .map_err(|e| {
            AppError::internal(
                "Password verification task failed",
                json!({ "reason": e.to_string() }),
            )
        })
}
