//! Alias generation and validation utilities.
//!
//! Generated aliases are drawn uniformly from a configured [`Charset`]. The
//! generator keeps no memory of earlier aliases: uniqueness is enforced by the
//! store, and callers regenerate on conflict.

use crate::error::AppError;
use rand::Rng;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;
use url::Url;

/// Default alphabet for generated aliases.
pub const DEFAULT_CHARSET: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// Aliases that would shadow fixed routes.
const RESERVED_ALIASES: &[&str] = &["api", "health", "static"];

static CUSTOM_ALIAS_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("static regex is valid"));

/// A non-empty set of distinct characters used to build aliases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Charset {
    chars: Vec<char>,
}

impl Charset {
    /// Builds a charset from a string, dropping duplicate characters.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if the string is empty or contains
    /// whitespace.
    pub fn new(chars: &str) -> Result<Self, AppError> {
        if chars.chars().any(char::is_whitespace) {
            return Err(AppError::bad_request(
                "Alias charset cannot contain whitespace",
                json!({ "charset": chars }),
            ));
        }

        let mut unique: Vec<char> = Vec::with_capacity(chars.len());
        for c in chars.chars() {
            if !unique.contains(&c) {
                unique.push(c);
            }
        }

        if unique.is_empty() {
            return Err(AppError::bad_request(
                "Alias charset cannot be empty",
                json!({}),
            ));
        }

        Ok(Self { chars: unique })
    }

    pub fn contains(&self, c: char) -> bool {
        self.chars.contains(&c)
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }
}

impl Default for Charset {
    fn default() -> Self {
        Self {
            chars: DEFAULT_CHARSET.chars().collect(),
        }
    }
}

/// Generates a random alias of exactly `length` characters from `charset`.
///
/// # Examples
///
/// ```ignore
/// let charset = Charset::new("ABC")?;
/// let alias = generate_alias(6, &charset);
/// assert_eq!(alias.chars().count(), 6);
/// ```
pub fn generate_alias(length: usize, charset: &Charset) -> String {
    let mut rng = rand::rng();

    (0..length)
        .map(|_| charset.chars[rng.random_range(0..charset.chars.len())])
        .collect()
}

/// Validates that a submitted URL can be shortened and returns its parsed form.
///
/// The serialized [`Url`] is what gets stored: tabs and newlines are
/// stripped and non-ASCII characters percent-encoded, so it is always a
/// valid `Location` header value.
///
/// # Rules
///
/// - Must parse as an absolute URL
/// - Scheme must be `http` or `https`
/// - Host must be present and non-empty (`localhost` is accepted)
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_url(candidate: &str) -> Result<Url, AppError> {
    let url = Url::parse(candidate).map_err(|e| {
        AppError::bad_request(
            "Invalid URL format",
            json!({ "url": candidate, "reason": e.to_string() }),
        )
    })?;

    if !matches!(url.scheme(), "http" | "https") {
        return Err(AppError::bad_request(
            "Only HTTP and HTTPS URLs can be shortened",
            json!({ "url": candidate, "scheme": url.scheme() }),
        ));
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(url),
        _ => Err(AppError::bad_request(
            "URL must contain a host",
            json!({ "url": candidate }),
        )),
    }
}

/// Validates a user-provided custom alias.
///
/// # Rules
///
/// - Length: 1 to `max_length` characters
/// - Allowed characters: ASCII letters, digits, `-` and `_`
/// - Cannot be a reserved route name
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_alias(alias: &str, max_length: usize) -> Result<(), AppError> {
    let length = alias.chars().count();
    if length == 0 || length > max_length {
        return Err(AppError::bad_request(
            format!("Custom alias must be 1-{max_length} characters"),
            json!({ "provided_length": length }),
        ));
    }

    if !CUSTOM_ALIAS_REGEX.is_match(alias) {
        return Err(AppError::bad_request(
            "Custom alias can only contain letters, digits, hyphens and underscores",
            json!({ "path": alias }),
        ));
    }

    if is_reserved_alias(alias) {
        return Err(AppError::bad_request(
            "This alias is reserved",
            json!({ "path": alias }),
        ));
    }

    Ok(())
}

/// Returns true if `alias` is shadowed by a fixed route.
pub fn is_reserved_alias(alias: &str) -> bool {
    RESERVED_ALIASES.contains(&alias)
}
