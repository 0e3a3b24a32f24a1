//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// A stored link.
///
/// Links are immutable once persisted: they are only ever created, read and
/// deleted (explicitly or by the garbage collector after `expire_at`).
#[derive(Debug, Clone, PartialEq, sqlx::FromRow)]
pub struct Link {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub expire_at: DateTime<Utc>,
    pub url: String,
    pub short: String,
    #[sqlx(rename = "password")]
    pub password_hash: Option<String>,
}

impl Link {
    /// Returns true if a password is needed to resolve this link.
    pub fn is_protected(&self) -> bool {
        self.password_hash.as_deref().is_some_and(|h| !h.is_empty())
    }

    /// Returns true once `now` has reached the expiry instant.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expire_at <= now
    }
}

/// Input data for inserting a new link.
#[derive(Debug, Clone)]
pub struct NewLink {
    pub id: Uuid,
    pub created_at: DateTime<Utc>,
    pub expire_at: DateTime<Utc>,
    pub url: String,
    pub short: String,
    pub password_hash: Option<String>,
}

impl NewLink {
    /// Builds the stored representation of this link.
    pub fn into_link(self) -> Link {
        Link {
            id: self.id,
            created_at: self.created_at,
            expire_at: self.expire_at,
            url: self.url,
            short: self.short,
            password_hash: self.password_hash,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn link_expiring_at(expire_at: DateTime<Utc>, password_hash: Option<String>) -> Link {
        NewLink {
            id: Uuid::new_v4(),
            created_at: expire_at - Duration::days(2),
            expire_at,
            url: "https://example.com".to_string(),
            short: "abc123".to_string(),
            password_hash,
        }
        .into_link()
    }

    #[test]
    fn test_link_expiry_boundary() {
        let now = Utc::now();

        assert!(link_expiring_at(now - Duration::hours(1), None).is_expired_at(now));
        assert!(link_expiring_at(now, None).is_expired_at(now));
        assert!(!link_expiring_at(now + Duration::hours(1), None).is_expired_at(now));
    }

    #[test]
    fn test_link_is_protected() {
        let now = Utc::now();

        assert!(!link_expiring_at(now, None).is_protected());
        assert!(!link_expiring_at(now, Some(String::new())).is_protected());
        assert!(link_expiring_at(now, Some("$argon2id$v=19$...".to_string())).is_protected());
    }

    #[test]
    fn test_new_link_into_link_keeps_fields() {
        let now = Utc::now();
        let id = Uuid::new_v4();
        let link = NewLink {
            id,
            created_at: now,
            expire_at: now + Duration::days(2),
            url: "https://rust-lang.org".to_string(),
            short: "xyz789".to_string(),
            password_hash: None,
        }
        .into_link();

        assert_eq!(link.id, id);
        assert_eq!(link.short, "xyz789");
        assert_eq!(link.url, "https://rust-lang.org");
        assert!(link.expire_at >= link.created_at);
    }
}
