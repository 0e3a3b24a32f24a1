//! DTOs for link management and resolution endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::Link;

/// JSON representation of a stored link.
///
/// The password hash is never exposed, only whether one is set.
#[derive(Debug, Serialize)]
pub struct LinkResponse {
    pub short: String,
    pub url: String,
    pub created_at: DateTime<Utc>,
    pub expire_at: DateTime<Utc>,
    pub password_protected: bool,
}

impl From<Link> for LinkResponse {
    fn from(link: Link) -> Self {
        let password_protected = link.is_protected();
        Self {
            short: link.short,
            url: link.url,
            created_at: link.created_at,
            expire_at: link.expire_at,
            password_protected,
        }
    }
}

/// Response for `GET /api/links`.
#[derive(Debug, Serialize)]
pub struct LinkListResponse {
    pub total: usize,
    pub items: Vec<LinkResponse>,
}

/// Body of `POST /{short}` used to unlock a protected link.
#[derive(Debug, Default, Deserialize)]
pub struct ResolveRequest {
    #[serde(default)]
    pub password: Option<String>,
}

/// Query string of `GET /{short}`.
#[derive(Debug, Default, Deserialize)]
pub struct ResolveQuery {
    #[serde(default)]
    pub password: Option<String>,
}

/// Response for a successful `POST /{short}`.
#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    pub url: String,
}
