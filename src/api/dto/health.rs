//! DTOs for health check endpoint.

use serde::Serialize;

/// Static liveness response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}
