//! # Shortlife
//!
//! A URL shortening service with expiring links, built with Axum and SQLx.
//!
//! ## Architecture
//!
//! This crate follows Clean Architecture principles with clear layer separation:
//!
//! - **Domain Layer** ([`domain`]) - Link entity, repository trait, garbage collector
//! - **Application Layer** ([`application`]) - Link creation and resolution rules
//! - **Infrastructure Layer** ([`infrastructure`]) - PostgreSQL and SQLite storage
//! - **API Layer** ([`api`]) - REST handlers, DTOs, and middleware
//!
//! ## Features
//!
//! - Random or custom aliases with bounded retry on collision
//! - Per-link expiry, enforced by a background garbage collector
//! - Optional Argon2id password protection per link
//! - PostgreSQL or SQLite backend selected at startup
//!
//! ## Quick Start
//!
//! ```bash
//! export DB_TYPE=sqlite
//! export DATABASE_URL="sqlite://shortlife.db"
//!
//! cargo run
//! ```
//!
//! ## Configuration
//!
//! Service configuration is loaded from environment variables via [`config::Config`].
//! See [`config`] module for available options.

pub mod api;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod state;
pub mod utils;

pub mod config;
pub mod server;

pub mod routes;

pub use error::AppError;
pub use state::AppState;

/// Commonly used types for external consumers.
///
/// Re-exports frequently used types to simplify imports for library users
/// and integration tests.
pub mod prelude {
    pub use crate::api::dto::parameters::Parameters;
    pub use crate::application::services::{LinkService, LinkSettings};
    pub use crate::domain::entities::{Link, NewLink};
    pub use crate::domain::garbage_collector::{GarbageCollector, SweepReport};
    pub use crate::domain::repositories::LinkRepository;
    pub use crate::error::AppError;
    pub use crate::state::AppState;
}
