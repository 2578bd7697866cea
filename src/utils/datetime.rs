//! Parsing of user-supplied expiry dates.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::error::AppError;
use serde_json::json;

/// Parses an ISO 8601 date or date-time into UTC.
///
/// Accepted forms:
/// - RFC 3339 with offset: `2026-12-31T23:59:59Z`, `2026-12-31T23:59:59+02:00`
/// - Date-time without offset (read as UTC): `2026-12-31T23:59:59`, with optional fraction
/// - Date only (midnight UTC): `2026-12-31`
///
/// # Errors
///
/// Returns [`AppError::Validation`] naming `field` if the value matches none of them.
pub fn parse_expiry(field: &str, value: &str) -> Result<DateTime<Utc>, AppError> {
    let value = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Ok(dt.with_timezone(&Utc));
    }

    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Ok(naive.and_utc());
    }

    if let Some(midnight) = NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
    {
        return Ok(midnight.and_utc());
    }

    Err(AppError::bad_request(
        format!("{field} must be an ISO 8601 date string"),
        json!({ "field": field, "value": value }),
    ))
}
