//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a short code to its original URL and counts the click.
///
/// # Endpoint
///
/// `GET /t/{code}`
///
/// The click counter is incremented in the same statement that looks the
/// link up, so every successful redirect is counted exactly once.
///
/// # Errors
///
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let link = state.link_service.resolve(&code).await?;

    tracing::debug!(code = %link.code, clicks = link.clicks, "Redirecting");

    Ok((StatusCode::FOUND, [(header::LOCATION, link.original_url)]))
}
