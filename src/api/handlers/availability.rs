//! Handler for the code availability endpoint.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::links::AvailabilityResponse;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::code_generator::validate_code;

/// Reports whether a short code is free.
///
/// # Endpoint
///
/// `GET /url/availability/{code}`
///
/// # Response
///
/// ```json
/// { "shortUrlId": "abc123", "isAvailable": true }
/// ```
pub async fn availability_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<AvailabilityResponse>, AppError> {
    validate_code(&code)?;

    let availability = state.shortener_service.check_availability(&code).await?;

    Ok(Json(availability.into()))
}
