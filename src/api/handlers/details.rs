//! Handler for the record details endpoint.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::shorten::ShortUrlResponse;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::code_generator::validate_code;

/// Returns the full record for a short code.
///
/// # Endpoint
///
/// `GET /url/details/{code}`
///
/// Expired records are still returned.
///
/// # Errors
///
/// Returns 400 Bad Request if the code is malformed.
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn details_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<ShortUrlResponse>, AppError> {
    validate_code(&code)?;

    let record = state.shortener_service.get_details(&code).await?;

    Ok(Json(record.into()))
}
