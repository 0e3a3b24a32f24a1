//! Password hashing for protected links.
//!
//! Uses Argon2id with default parameters. The PHC string encoding is 97
//! characters long, which is what the `password` column is sized for.

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};

/// Length of an Argon2id PHC string produced with default parameters.
pub const HASH_LENGTH: usize = 97;

#[derive(Debug, thiserror::Error)]
pub enum PasswordError {
    #[error("Password hash error: {0}")]
    Hash(String),
}

/// Hashes a plaintext password for storage.
///
/// An empty password yields an empty hash, meaning "no password set".
///
/// # Errors
///
/// Returns [`PasswordError::Hash`] if Argon2 fails to produce a hash.
pub fn hash_password(plaintext: &str) -> Result<String, PasswordError> {
    if plaintext.is_empty() {
        return Ok(String::new());
    }

    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PasswordError::Hash(e.to_string()))
}

/// Checks a plaintext password against a stored hash.
///
/// Returns true iff the plaintext matches the hash, or both are empty.
/// A stored hash that cannot be parsed never verifies.
pub fn verify_password(plaintext: &str, stored_hash: &str) -> bool {
    if stored_hash.is_empty() {
        return plaintext.is_empty();
    }

    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        tracing::warn!("Stored password hash is not a valid PHC string");
        return false;
    };

    Argon2::default()
        .verify_password(plaintext.as_bytes(), &parsed)
        .is_ok()
}
