//! Response DTOs for deletion and availability queries.

use serde::Serialize;

use crate::application::services::{Availability, Deletion};

/// Confirmation body for `DELETE /url/delete/{code}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResponse {
    pub message: String,
    pub short_url_id: String,
}

impl From<Deletion> for DeleteResponse {
    fn from(deletion: Deletion) -> Self {
        Self {
            message: deletion.message,
            short_url_id: deletion.short_url_id,
        }
    }
}

/// Body for `GET /url/availability/{code}`.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AvailabilityResponse {
    pub short_url_id: String,
    pub is_available: bool,
}

impl From<Availability> for AvailabilityResponse {
    fn from(availability: Availability) -> Self {
        Self {
            short_url_id: availability.short_url_id,
            is_available: availability.is_available,
        }
    }
}
