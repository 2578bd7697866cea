//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `/url/*` - Short URL API, see [`crate::api::routes::url_routes`]
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Access guard** - Per-route role check driven by the access policy
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::middleware::tracing;
use crate::state::AppState;
use axum::Router;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the router with all routes and middleware, without path
/// normalization.
pub fn router(state: AppState) -> Router {
    Router::new()
        .nest("/url", api::routes::url_routes(&state))
        .with_state(state)
        .layer(tracing::layer())
}

/// Constructs the application service: [`router`] with trailing slashes trimmed
/// before routing.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    NormalizePathLayer::trim_trailing_slash().layer(router(state))
}
