//! Handler for short URL redirect.

use axum::{
    extract::{Path, State},
    http::{StatusCode, header},
    response::IntoResponse,
};

use crate::error::AppError;
use crate::state::AppState;
use crate::utils::code_generator::validate_code;

/// Redirects a short code to its original URL.
///
/// # Endpoint
///
/// `GET /url/{code}`
///
/// Responds `302 Found` with the stored long URL in `Location`.
///
/// # Errors
///
/// Returns 400 Bad Request if the code is malformed.
/// Returns 404 Not Found if the short code doesn't exist.
/// Returns 410 Gone if the link's expiry date has passed.
pub async fn redirect_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    validate_code(&code)?;

    let long_url = state.shortener_service.resolve(&code).await?;

    Ok((StatusCode::FOUND, [(header::LOCATION, long_url)]))
}
