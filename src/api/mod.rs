//! HTTP surface: DTOs, handlers, middleware and the `/api` routes.
//!
//! Handlers only translate between HTTP and
//! [`LinkService`](crate::application::services::LinkService); every rule
//! about aliases, expiry and passwords lives in the service.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod routes;
