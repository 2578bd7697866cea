//! API route configuration.
//!
//! Every route passes through [`crate::api::middleware::access_guard`] bound
//! to the operation it performs. Whether the guard demands a token is decided
//! by the configured access policy, not by the route table.

use std::sync::Arc;

use axum::{
    Router, middleware,
    routing::{MethodRouter, delete, get, patch, post},
};

use crate::api::handlers::{
    availability_handler, delete_link_handler, details_handler, health_handler, redirect_handler,
    shorten_handler, update_link_handler,
};
use crate::api::middleware::access_guard::{self, RouteGuard};
use crate::application::services::AuthService;
use crate::domain::access_policy::Operation;
use crate::state::AppState;

/// All short URL routes, relative to the `/url` prefix.
///
/// # Endpoints
///
/// - `GET    /health`              - Liveness check
/// - `POST   /shorten`             - Create a short URL
/// - `GET    /details/{code}`      - Full record for a code
/// - `PATCH  /update/{code}`       - Partially update a record
/// - `DELETE /delete/{code}`       - Delete a record
/// - `GET    /availability/{code}` - Whether a code is unused
/// - `GET    /{code}`              - Redirect to the long URL
pub fn url_routes(state: &AppState) -> Router<AppState> {
    let auth = &state.auth_service;

    Router::new()
        .route("/health", guarded(get(health_handler), auth, Operation::Health))
        .route(
            "/shorten",
            guarded(post(shorten_handler), auth, Operation::Shorten),
        )
        .route(
            "/details/{code}",
            guarded(get(details_handler), auth, Operation::Details),
        )
        .route(
            "/update/{code}",
            guarded(patch(update_link_handler), auth, Operation::Update),
        )
        .route(
            "/delete/{code}",
            guarded(delete(delete_link_handler), auth, Operation::Delete),
        )
        .route(
            "/availability/{code}",
            guarded(
                get(availability_handler),
                auth,
                Operation::CheckAvailability,
            ),
        )
        .route(
            "/{code}",
            guarded(get(redirect_handler), auth, Operation::Resolve),
        )
}

/// Wraps a method router with the access guard for `operation`.
///
/// Uses `route_layer` so unmatched methods still yield `405` rather than `401`.
fn guarded(
    route: MethodRouter<AppState>,
    auth_service: &Arc<AuthService>,
    operation: Operation,
) -> MethodRouter<AppState> {
    let guard = RouteGuard::new(Arc::clone(auth_service), operation);
    route.route_layer(middleware::from_fn_with_state(guard, access_guard::layer))
}
