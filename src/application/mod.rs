//! Application layer services implementing business logic.
//!
//! Services consume repository traits, apply validation and business rules,
//! and provide a clean API for HTTP handlers and the admin CLI.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link creation, resolution, listing and deletion

pub mod services;
