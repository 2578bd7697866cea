//! Handlers for link management endpoints (update, delete).

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::links::DeleteResponse;
use crate::api::dto::shorten::ShortUrlResponse;
use crate::api::dto::update_link::UpdateShortUrlRequest;
use crate::api::extract::ValidatedJson;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::code_generator::validate_code;

/// Partially updates a link.
///
/// # Endpoint
///
/// `PATCH /url/update/{code}`
///
/// Requires a bearer token whose role may update (default: `admin` or `manager`).
///
/// # Request Body
///
/// ```json
/// {
///   "longUrl": "https://example.com/new",
///   "uriName": null,
///   "expiryDate": "2031-01-01"
/// }
/// ```
///
/// Absent fields are left unchanged; `null` clears `uriName` or `expiryDate`.
///
/// # Errors
///
/// Returns 400 Bad Request if the code, URL or expiry date is invalid.
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn update_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<UpdateShortUrlRequest>,
) -> Result<Json<ShortUrlResponse>, AppError> {
    validate_code(&code)?;

    let record = state
        .shortener_service
        .update(&code, payload.into_patch()?)
        .await?;

    Ok(Json(record.into()))
}

/// Permanently deletes a link.
///
/// # Endpoint
///
/// `DELETE /url/delete/{code}`
///
/// Requires a bearer token whose role may delete (default: `admin`).
///
/// # Errors
///
/// Returns 400 Bad Request if the code is malformed.
/// Returns 404 Not Found if the short code doesn't exist.
pub async fn delete_link_handler(
    Path(code): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DeleteResponse>, AppError> {
    validate_code(&code)?;

    let deletion = state.shortener_service.delete(&code).await?;

    Ok(Json(deletion.into()))
}
