//! API route configuration.

use crate::api::handlers::{
    create_link_handler, get_link_handler, list_links_handler, login_handler, register_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Public account routes, nested under `/api/auth`.
///
/// # Endpoints
///
/// - `POST /register` - Create an account
/// - `POST /login`    - Obtain a session token
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/register", post(register_handler))
        .route("/login", post(login_handler))
}

/// Link routes, protected by session token authentication.
///
/// # Endpoints
///
/// - `POST /link`      - Shorten a URL
/// - `GET  /link`      - List the caller's links
/// - `GET  /link/{id}` - One of the caller's links
pub fn link_routes() -> Router<AppState> {
    Router::new()
        .route("/link", post(create_link_handler).get(list_links_handler))
        .route("/link/{id}", get(get_link_handler))
}
