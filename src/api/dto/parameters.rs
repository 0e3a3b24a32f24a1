//! Request parameters for link creation and their decoder.

use serde::{Deserialize, Serialize};
use serde_json::error::Category;

/// Parameters submitted when creating a link.
///
/// Decoding only checks structure and types. Business rules (URL validity,
/// length bounds, expiry format) are enforced by the creation operation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parameters {
    /// The original URL to shorten.
    pub url: String,

    /// Desired alias length. `None` or `0` selects the configured default.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,

    /// Optional custom alias.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,

    /// Offset after which the link expires, e.g. `"2d"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_after: Option<String>,

    /// Optional plaintext access password.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
}

#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The body is not well-formed JSON, or is truncated.
    #[error("malformed request body: {0}")]
    Malformed(String),

    /// Well-formed JSON whose fields have the wrong shape or type.
    #[error("type mismatch in request body: {0}")]
    TypeMismatch(String),
}

impl From<serde_json::Error> for DecodeError {
    fn from(e: serde_json::Error) -> Self {
        match e.classify() {
            Category::Data => DecodeError::TypeMismatch(e.to_string()),
            Category::Io | Category::Syntax | Category::Eof => {
                DecodeError::Malformed(e.to_string())
            }
        }
    }
}

impl Parameters {
    /// Decodes a raw JSON body.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError`] on malformed JSON or type mismatches.
    pub fn decode(raw_body: &[u8]) -> Result<Self, DecodeError> {
        Ok(serde_json::from_slice(raw_body)?)
    }

    /// Custom alias, treating an empty string as absent.
    pub fn custom_path(&self) -> Option<&str> {
        self.path.as_deref().filter(|p| !p.is_empty())
    }

    /// Plaintext password, treating an empty string as absent.
    pub fn plaintext_password(&self) -> Option<&str> {
        self.password.as_deref().filter(|p| !p.is_empty())
    }

    /// Expiry offset, treating an empty string as absent.
    pub fn expiry_offset(&self) -> Option<&str> {
        self.expire_after.as_deref().filter(|e| !e.trim().is_empty())
    }

    /// Requested alias length, treating zero as absent.
    pub fn requested_length(&self) -> Option<usize> {
        self.length.filter(|l| *l > 0)
    }
}
