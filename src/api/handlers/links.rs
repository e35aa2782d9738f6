//! Handlers for link management endpoints (create, list, get, delete).

use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use validator::Validate;

use crate::api::dto::link::{CreateLinkRequest, LinkResponse};
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
///   "customCode": "github"   // optional, 6-8 letters and digits
/// }
/// ```
///
/// # Response
///
/// `201 Created`
///
/// ```json
/// {
///   "code": "github",
///   "url": "https://example.com",
///   "shortUrl": "https://sho.rt/github",
///   "clicks": 0,
///   "lastClicked": null,
///   "createdAt": "2026-01-01T00:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// - 400 `invalid_url` / `invalid_code_format` / `validation_error`
/// - 409 `code_taken` if the custom code is in use
/// - 503 `allocation_exhausted` if no free random code was found; safe to resubmit
pub async fn create_link_handler(
    State(state): State<AppState>,
    Json(payload): Json<CreateLinkRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let custom_code = payload.custom_code();
    let url = payload.url.unwrap_or_default();

    let link = state.link_service.create_link(url, custom_code).await?;
    let short_url = state.link_service.short_url(&link.code);

    Ok((
        StatusCode::CREATED,
        Json(LinkResponse::from_link(link, short_url)),
    ))
}

/// Lists every link, newest first.
///
/// # Endpoint
///
/// `GET /api/links`
///
/// No pagination: the whole table is returned.
pub async fn list_links_handler(
    State(state): State<AppState>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.link_service.list_links().await?;

    let items = links
        .into_iter()
        .map(|link| {
            let short_url = state.link_service.short_url(&link.code);
            LinkResponse::from_link(link, short_url)
        })
        .collect();

    Ok(Json(items))
}

/// Returns a single link without counting a click.
///
/// # Endpoint
///
/// `GET /api/links/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if no link has this code.
pub async fn get_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.get_link(&code).await?;
    let short_url = state.link_service.short_url(&link.code);

    Ok(Json(LinkResponse::from_link(link, short_url)))
}

/// Deletes a link. The row is removed and its code can be reused.
///
/// # Endpoint
///
/// `DELETE /api/links/{code}`
///
/// # Errors
///
/// Returns 404 Not Found if no link has this code, including a repeated delete.
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.link_service.delete_link(&code).await?;

    Ok(StatusCode::NO_CONTENT)
}
