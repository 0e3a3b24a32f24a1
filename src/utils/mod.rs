//! Utility functions used across the application:
//!
//! - [`alias`] - Alias generation, custom alias and URL validation
//! - [`expiry`] - `expire_after` offset parsing
//! - [`password`] - Argon2 password hashing and verification

pub mod alias;
pub mod expiry;
pub mod password;
