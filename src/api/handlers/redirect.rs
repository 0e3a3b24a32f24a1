//! Handlers for short link resolution.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, Query, State},
    response::Redirect,
};
use serde_json::json;
use tracing::debug;

use crate::api::dto::links::{ResolveQuery, ResolveRequest, ResolveResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Redirects an alias to its target URL.
///
/// # Endpoint
///
/// `GET /{short}?password=...`
///
/// # Errors
///
/// - 404 Not Found if the alias does not exist
/// - 401 Unauthorized if the link is protected and the `password` query
///   parameter is missing or wrong
pub async fn redirect_handler(
    Path(short): Path<String>,
    Query(query): Query<ResolveQuery>,
    State(state): State<AppState>,
) -> Result<Redirect, AppError> {
    let url = state
        .link_service
        .resolve(&short, query.password.as_deref())
        .await?;

    debug!(short = %short, "Redirecting");

    Ok(Redirect::temporary(&url))
}

/// Resolves an alias and returns the target URL as JSON.
///
/// # Endpoint
///
/// `POST /{short}`
///
/// # Request Body
///
/// ```json
/// { "password": "secret" }
/// ```
///
/// The body may be empty for unprotected links.
pub async fn resolve_handler(
    Path(short): Path<String>,
    State(state): State<AppState>,
    body: Bytes,
) -> Result<Json<ResolveResponse>, AppError> {
    let request: ResolveRequest = if body.iter().all(u8::is_ascii_whitespace) {
        ResolveRequest::default()
    } else {
        serde_json::from_slice(&body).map_err(|e| {
            AppError::bad_request("Invalid request body", json!({ "reason": e.to_string() }))
        })?
    };

    let url = state
        .link_service
        .resolve(&short, request.password.as_deref())
        .await?;

    Ok(Json(ResolveResponse { url }))
}
