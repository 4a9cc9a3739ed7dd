//! Handlers for account registration and login.

use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
};

use crate::api::dto::auth::{CredentialsRequest, LoginResponse, RegisterResponse};
use crate::error::AppError;
use crate::state::AppState;

/// Creates a user account.
///
/// # Endpoint
///
/// `POST /api/auth/register`
///
/// # Request Body
///
/// ```json
/// { "email": "user@example.com", "password": "secret123" }
/// ```
///
/// # Errors
///
/// All failures except internal ones are `400 Bad Request`: invalid fields
/// (`validation_error`) or an already registered email (`conflict`).
pub async fn register_handler(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<(StatusCode, Json<RegisterResponse>), AppError> {
    let Json(payload) = payload?;

    let user = state
        .auth_service
        .register(&payload.email, payload.password)
        .await
        .map_err(AppError::into_rejection)?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse {
            message: "User created".to_string(),
            user_id: user.id,
        }),
    ))
}

/// Exchanges credentials for a session token valid for one hour.
///
/// # Endpoint
///
/// `POST /api/auth/login`
///
/// # Errors
///
/// `400 Bad Request` with code `validation_error`, `not_found` or
/// `invalid_credentials`.
pub async fn login_handler(
    State(state): State<AppState>,
    payload: Result<Json<CredentialsRequest>, JsonRejection>,
) -> Result<Json<LoginResponse>, AppError> {
    let Json(payload) = payload?;

    let session = state
        .auth_service
        .login(&payload.email, payload.password)
        .await
        .map_err(AppError::into_rejection)?;

    Ok(Json(LoginResponse {
        token: session.token,
        user_id: session.user_id,
    }))
}
