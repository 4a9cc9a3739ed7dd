//! Handlers for the caller's links.

use axum::{
    Extension, Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::api::dto::link::{CreateLinkRequest, LinkResponse};
use crate::api::middleware::auth::AuthUser;
use crate::domain::entities::Link;
use crate::error::AppError;
use crate::state::AppState;

/// Shortens a URL on behalf of the authenticated user.
///
/// # Endpoint
///
/// `POST /api/link`
///
/// # Request Body
///
/// ```json
/// { "originalUrl": "https://example.com/page" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if the URL is not a valid http(s) URL.
pub async fn create_link_handler(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    payload: Result<Json<CreateLinkRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    let Json(payload) = payload?;

    let link = state
        .link_service
        .create_link(user_id, &payload.original_url)
        .await?;

    Ok((StatusCode::CREATED, Json(to_response(&state, link))))
}

/// Lists the caller's links, newest first.
///
/// # Endpoint
///
/// `GET /api/link`
pub async fn list_links_handler(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let links = state.link_service.list_links(user_id).await?;

    Ok(Json(
        links
            .into_iter()
            .map(|link| to_response(&state, link))
            .collect(),
    ))
}

/// Returns one of the caller's links.
///
/// # Endpoint
///
/// `GET /api/link/{id}`
///
/// # Errors
///
/// Returns 404 Not Found if the link does not exist or belongs to another user.
pub async fn get_link_handler(
    State(state): State<AppState>,
    Extension(AuthUser(user_id)): Extension<AuthUser>,
    Path(link_id): Path<i64>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.get_link(user_id, link_id).await?;

    Ok(Json(to_response(&state, link)))
}

fn to_response(state: &AppState, link: Link) -> LinkResponse {
    let short_url = state.link_service.short_url(&link.code);
    LinkResponse::from_link(link, short_url)
}
