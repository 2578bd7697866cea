//! Short URL entity representing a persisted code → URL mapping.

use chrono::{DateTime, Utc};

/// Creator fallback when no user name is supplied.
pub const SYSTEM_CREATOR: &str = "system";

/// A shortened URL record with ownership metadata.
///
/// `short_url_id` is the lookup key and never changes after creation;
/// `short_url` is always the configured base URL joined with that key.
#[derive(Debug, Clone, PartialEq)]
pub struct ShortUrl {
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

impl ShortUrl {
    /// Returns true if the record has an expiry date strictly before `now`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expiry_date.is_some_and(|expiry| expiry < now)
    }

    /// Returns true if the record is expired at the current wall-clock time.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

/// Input data for inserting a new record.
#[derive(Debug, Clone)]
pub struct NewShortUrl {
    pub short_url_id: String,
    pub short_url: String,
    pub long_url: String,
    pub uri_name: Option<String>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub created_by: String,
}

impl NewShortUrl {
    /// Materializes the record as the store would persist it.
    pub fn into_record(self, created_at: DateTime<Utc>) -> ShortUrl {
        ShortUrl {
            short_url_id: self.short_url_id,
            short_url: self.short_url,
            long_url: self.long_url,
            uri_name: self.uri_name,
            expiry_date: self.expiry_date,
            user_name: self.user_name,
            email: self.email,
            created_by: self.created_by,
            created_at,
            update_on: None,
        }
    }
}

/// Partial update for an existing record.
///
/// `None` fields are left unchanged. For the nullable fields,
/// `Some(None)` clears the value and `Some(Some(v))` sets it.
/// The key and the derived short URL are not part of the patch.
#[derive(Debug, Clone, Default)]
pub struct ShortUrlPatch {
    pub long_url: Option<String>,
    pub uri_name: Option<Option<String>>,
    pub expiry_date: Option<Option<DateTime<Utc>>>,
    pub update_on: Option<DateTime<Utc>>,
}

impl ShortUrlPatch {
    /// Applies the patch to `record` in place.
    pub fn apply_to(&self, record: &mut ShortUrl) {
        if let Some(long_url) = &self.long_url {
            record.long_url = long_url.clone();
        }
        if let Some(uri_name) = &self.uri_name {
            record.uri_name = uri_name.clone();
        }
        if let Some(expiry_date) = self.expiry_date {
            record.expiry_date = expiry_date;
        }
        if let Some(update_on) = self.update_on {
            record.update_on = Some(update_on);
        }
    }
}
