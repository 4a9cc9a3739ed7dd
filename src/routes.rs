//! Top-level router combining the API, redirects and the web client.
//!
//! # Route Structure
//!
//! - `GET  /t/{code}`       - Short link redirect (public)
//! - `GET  /health`         - Health check (public)
//! - `/api/auth/*`          - Registration and login (public, strict rate limit)
//! - `/api/link*`           - Link management (session token required)
//! - everything else        - Built web client, when `CLIENT_DIR` is set
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Rate limiting** - Per-IP token bucket (configurable for proxy deployments)
//! - **Authentication** - Bearer session token on link routes
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{auth, rate_limit, tracing};
use crate::state::AppState;
use axum::routing::get;
use axum::{Router, middleware};
use std::path::Path;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};
use tower_http::services::{ServeDir, ServeFile};

/// Builds all routes and middleware, without path normalization.
///
/// # Arguments
///
/// - `state` - shared application state injected into all handlers
/// - `behind_proxy` - when `true`, rate limiting reads client IP from
///   `X-Forwarded-For` / `X-Real-IP` headers instead of the peer socket address
/// - `client_dir` - directory with the built web client; unknown paths fall
///   back to its `index.html`
pub fn router(state: AppState, behind_proxy: bool, client_dir: Option<&Path>) -> Router {
    let auth_router = rate_limit::limit(
        api::routes::auth_routes(),
        rate_limit::STRICT,
        behind_proxy,
    );

    let link_router = rate_limit::limit(
        api::routes::link_routes()
            .route_layer(middleware::from_fn_with_state(state.clone(), auth::layer)),
        rate_limit::RELAXED,
        behind_proxy,
    );

    let api_router = Router::new().nest("/auth", auth_router).merge(link_router);

    let mut router = Router::new()
        .route("/t/{code}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api_router);

    if let Some(dir) = client_dir {
        router = router.fallback_service(
            ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html"))),
        );
    }

    router.with_state(state).layer(tracing::layer())
}

/// Constructs the application service with trailing slashes trimmed.
pub fn app_router(
    state: AppState,
    behind_proxy: bool,
    client_dir: Option<&Path>,
) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state, behind_proxy, client_dir))
}
