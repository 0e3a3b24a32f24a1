//! API route configuration.

use crate::api::handlers::{create_link_handler, delete_link_handler, list_links_handler};
use crate::state::AppState;
use axum::{
    Router,
    routing::{delete, get},
};

/// Link management routes, mounted under `/api`.
///
/// # Endpoints
///
/// - `POST   /links`          - Create a short link
/// - `GET    /links`          - List all links
/// - `DELETE /links/{short}`  - Delete a link
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/links", get(list_links_handler).post(create_link_handler))
        .route("/links/{short}", delete(delete_link_handler))
}
