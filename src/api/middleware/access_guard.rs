//! Role-based access guard applied in front of every route.

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::header,
    middleware::Next,
    response::Response,
};
use serde_json::json;

use crate::application::services::AuthService;
use crate::domain::access_policy::Operation;
use crate::error::AppError;

/// State bound to one route: the shared auth service plus the operation
/// the route performs.
#[derive(Clone)]
pub struct RouteGuard {
    pub auth_service: Arc<AuthService>,
    pub operation: Operation,
}

impl RouteGuard {
    pub fn new(auth_service: Arc<AuthService>, operation: Operation) -> Self {
        Self {
            auth_service,
            operation,
        }
    }
}

/// Checks the caller against the access policy before the handler runs.
///
/// # Header Format
///
/// ```text
/// Authorization: Bearer <token>
/// ```
///
/// Operations without a policy rule pass straight through and the header
/// is ignored. For guarded operations the verified [`Claims`] are inserted
/// into the request extensions.
///
/// # Errors
///
/// Returns `401 Unauthorized` if the header is missing, malformed, or the
/// token fails verification. Returns `403 Forbidden` if the token's role
/// is not allowed for the operation.
///
/// [`Claims`]: crate::domain::token_authority::Claims
///
/// # Example
///
/// ```rust,ignore
/// use axum::{middleware, routing::delete};
///
/// let guard = RouteGuard::new(state.auth_service.clone(), Operation::Delete);
/// let route = delete(delete_link_handler)
///     .route_layer(middleware::from_fn_with_state(guard, access_guard::layer));
/// ```
pub async fn layer(
    State(guard): State<RouteGuard>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let authorization = match req.headers().get(header::AUTHORIZATION) {
        Some(value) => Some(value.to_str().map_err(|_| {
            AppError::unauthorized(
                "Invalid token format",
                json!({ "reason": "Authorization header is not valid ASCII" }),
            )
        })?),
        None => None,
    };

    let admitted = guard.auth_service.check(guard.operation, authorization)?;

    if let Some(claims) = admitted {
        tracing::debug!(
            operation = %guard.operation,
            role = %claims.role,
            subject = claims.sub.as_deref().unwrap_or("-"),
            "Access granted"
        );
        req.extensions_mut().insert(claims);
    }

    Ok(next.run(req).await)
}
