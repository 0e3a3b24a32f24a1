//! Domain layer containing business entities and background jobs.
//!
//! Defines the link entity, the storage contract, and the garbage collector
//! that removes expired links. Nothing here depends on a particular database
//! or on the HTTP layer.
//!
//! # Architecture
//!
//! - [`entities`] - Core business data structures
//! - [`repositories`] - Data access trait definitions
//! - [`garbage_collector`] - Periodic removal of expired links
//!
//! # Expiry Flow
//!
//! 1. [`crate::application::services::LinkService`] stamps `expire_at` at creation
//! 2. [`garbage_collector::GarbageCollector`] wakes on every interval tick
//! 3. Links whose `expire_at` has passed are deleted via [`repositories::LinkRepository`]

pub mod entities;
pub mod garbage_collector;
pub mod repositories;
