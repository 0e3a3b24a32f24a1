//! Handlers for link management endpoints (create, list, delete).

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::StatusCode,
};

use crate::api::dto::links::{LinkListResponse, LinkResponse};
use crate::api::dto::parameters::Parameters;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short link.
///
/// # Endpoint
///
/// `POST /api/links`
///
/// # Request Body
///
/// ```json
/// {
///   "url": "https://example.com",
///   "length": 8,            // optional, generated alias length
///   "path": "my-link",      // optional, custom alias
///   "expire_after": "1d",   // optional, e.g. 30m, 12h, 7d, 2w
///   "password": "secret"    // optional
/// }
/// ```
///
/// The body is decoded by [`Parameters::decode`] so that malformed JSON and
/// wrongly-typed fields are both reported as 400 with a reason.
///
/// # Errors
///
/// - 400 Bad Request for an undecodable body or invalid field
/// - 409 Conflict if the custom alias is taken
/// - 503 Service Unavailable if no free alias could be generated
pub async fn create_link_handler(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    let params = Parameters::decode(&body)?;

    let link = state.link_service.create_link(params).await?;

    Ok((StatusCode::CREATED, Json(LinkResponse::from(link))))
}

/// Lists every stored link, including ones awaiting garbage collection.
///
/// # Endpoint
///
/// `GET /api/links`
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<LinkListResponse>, AppError> {
    let links = state.link_service.list_links().await?;

    let items: Vec<LinkResponse> = links.into_iter().map(LinkResponse::from).collect();

    Ok(Json(LinkListResponse {
        total: items.len(),
        items,
    }))
}

/// Deletes a link by alias.
///
/// # Endpoint
///
/// `DELETE /api/links/{short}`
///
/// Returns 204 No Content whether or not the alias existed.
pub async fn delete_link_handler(
    State(state): State<AppState>,
    Path(short): Path<String>,
) -> Result<StatusCode, AppError> {
    state.link_service.delete_link(&short).await?;

    Ok(StatusCode::NO_CONTENT)
}
