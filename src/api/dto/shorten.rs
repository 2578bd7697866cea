//! DTOs for the shorten endpoint and the record representation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::application::services::ShortenInput;
use crate::domain::entities::ShortUrl;
use crate::error::AppError;
use crate::utils::datetime::parse_expiry;

/// Request body for `POST /url/shorten`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    /// The original URL to shorten (must be valid HTTP/HTTPS).
    #[validate(url(message = "Invalid URL format"))]
    pub long_url: String,

    /// Optional human-readable label.
    #[validate(length(max = 255))]
    pub uri_name: Option<String>,

    /// Optional ISO 8601 expiry. After this instant the code stops resolving.
    pub expiry_date: Option<String>,

    #[validate(length(max = 255))]
    pub user_name: Option<String>,

    #[validate(length(max = 320))]
    pub email: Option<String>,
}

impl ShortenRequest {
    /// Converts the request into service input, parsing the expiry date.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `expiryDate` is not an ISO 8601 date.
    pub fn into_input(self) -> Result<ShortenInput, AppError> {
        let expiry_date = self
            .expiry_date
            .as_deref()
            .map(|value| parse_expiry("expiryDate", value))
            .transpose()?;

        Ok(ShortenInput {
            long_url: self.long_url,
            uri_name: self.uri_name,
            expiry_date,
            user_name: self.user_name,
            email: self.email,
        })
    }
}

/// JSON representation of a stored short URL record.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShortUrlResponse {
    pub short_url_id: String,
    pub short_url: String,
    pub long_url: String,
    pub uri_name: Option<String>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub created_by: String,
    pub created_at: DateTime<Utc>,
    pub update_on: Option<DateTime<Utc>>,
}

impl From<ShortUrl> for ShortUrlResponse {
    fn from(record: ShortUrl) -> Self {
        Self {
            short_url_id: record.short_url_id,
            short_url: record.short_url,
            long_url: record.long_url,
            uri_name: record.uri_name,
            expiry_date: record.expiry_date,
            user_name: record.user_name,
            email: record.email,
            created_by: record.created_by,
            created_at: record.created_at,
            update_on: record.update_on,
        }
    }
}
