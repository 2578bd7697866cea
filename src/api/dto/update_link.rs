//! DTO for the update endpoint.

use serde::Deserialize;
use serde_with::serde_as;
use validator::Validate;

use crate::domain::entities::ShortUrlPatch;
use crate::error::AppError;
use crate::utils::datetime::parse_expiry;

/// Request body for `PATCH /url/update/{code}`.
///
/// All fields are optional. Only provided fields are changed.
///
/// # `uriName` / `expiryDate` semantics
///
/// - **Absent** → leave existing value unchanged
/// - **`null`** → clear the value
/// - **Value** → set it
#[serde_as]
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateShortUrlRequest {
    /// New destination URL.
    #[validate(url(message = "Invalid URL format"))]
    pub long_url: Option<String>,

    #[serde(default, with = "::serde_with::rust::double_option")]
    pub uri_name: Option<Option<String>>,

    /// ISO 8601 expiry. Absent = no change, null = clear, value = set.
    #[serde(default, with = "::serde_with::rust::double_option")]
    pub expiry_date: Option<Option<String>>,
}

impl UpdateShortUrlRequest {
    /// Converts the request into a patch, parsing the expiry date.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `expiryDate` is not an ISO 8601 date.
    pub fn into_patch(self) -> Result<ShortUrlPatch, AppError> {
        let expiry_date = match self.expiry_date {
            None => None,
            Some(None) => Some(None),
            Some(Some(value)) => Some(Some(parse_expiry("expiryDate", &value)?)),
        };

        Ok(ShortUrlPatch {
            long_url: self.long_url,
            uri_name: self.uri_name,
            expiry_date,
            update_on: None,
        })
    }
}
