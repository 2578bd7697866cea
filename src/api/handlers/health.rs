//! Handler for health check endpoint.

use axum::Json;

use crate::api::dto::health::HealthResponse;

/// Returns a static liveness response.
///
/// # Endpoint
///
/// `GET /url/health`
///
/// Does not touch storage and is never guarded.
///
/// # Response
///
/// ```json
/// { "status": "OK", "version": "0.1.0" }
/// ```
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        version: env!("CARGO_PKG_VERSION"),
    })
}
