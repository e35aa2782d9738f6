//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};

use crate::error::AppError;
use crate::state::AppState;

/// Records a click and redirects a short code to its destination.
///
/// # Endpoint
///
/// `GET /{code}`
///
/// # Behavior
///
/// The click is counted in the same database statement that resolves the
/// destination, so a 302 is only returned for a counted visit.
///
/// The response is `302 Found` with `Cache-Control: no-store`, so browsers and
/// proxies come back through the service on every visit.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist (or was deleted while
/// the visit was in flight).
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response, AppError> {
    let url = state.link_service.visit(&code).await?;

    Ok((
        StatusCode::FOUND,
        [
            (header::LOCATION, url),
            (header::CACHE_CONTROL, "no-store".to_string()),
        ],
    )
        .into_response())
}
