//! Handler for link shortening endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::api::dto::shorten::{ShortUrlResponse, ShortenRequest};
use crate::api::extract::ValidatedJson;
use crate::error::AppError;
use crate::state::AppState;

/// Creates a short URL for a long URL.
///
/// # Endpoint
///
/// `POST /url/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "longUrl": "https://example.com/some/long/path",
///   "uriName": "docs",
///   "expiryDate": "2030-01-01T00:00:00Z",
///   "userName": "alice",
///   "email": "alice@example.com"
/// }
/// ```
///
/// Only `longUrl` is required.
///
/// # Response
///
/// `201 Created` with the stored record.
///
/// # Errors
///
/// Returns 400 Bad Request if the body is malformed or the URL or expiry
/// date is invalid.
/// Returns 500 Internal Server Error if no free code could be generated.
pub async fn shorten_handler(
    State(state): State<AppState>,
    ValidatedJson(payload): ValidatedJson<ShortenRequest>,
) -> Result<(StatusCode, Json<ShortUrlResponse>), AppError> {
    let record = state
        .shortener_service
        .shorten(payload.into_input()?)
        .await?;

    Ok((StatusCode::CREATED, Json(record.into())))
}
