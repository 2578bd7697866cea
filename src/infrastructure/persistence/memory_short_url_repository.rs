//! In-process implementation of the short URL repository.

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::entities::{NewShortUrl, ShortUrl, ShortUrlPatch};
use crate::domain::repositories::ShortUrlRepository;
use crate::error::AppError;

/// Record store backed by a `HashMap` behind an async `RwLock`.
///
/// Insert checks and writes under a single write lock, so a duplicate code is
/// always reported as [`AppError::Conflict`]. Contents are lost on restart.
#[derive(Default)]
pub struct InMemoryShortUrlRepository {
    records: RwLock<HashMap<String, ShortUrl>>,
}

impl InMemoryShortUrlRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ShortUrlRepository for InMemoryShortUrlRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortUrl>, AppError> {
        Ok(self.records.read().await.get(code).cloned())
    }

    async fn insert(&self, new_short_url: NewShortUrl) -> Result<ShortUrl, AppError> {
        let mut records = self.records.write().await;

        if records.contains_key(&new_short_url.short_url_id) {
            return Err(AppError::conflict(
                "Unique constraint violation",
                json!({ "constraint": "short_urls_pkey" }),
            ));
        }

        let record = new_short_url.into_record(Utc::now());
        records.insert(record.short_url_id.clone(), record.clone());
        Ok(record)
    }

    async fn update(&self, code: &str, patch: ShortUrlPatch) -> Result<ShortUrl, AppError> {
        let mut records = self.records.write().await;

        let record = records.get_mut(code).ok_or_else(|| {
            AppError::not_found("Short URL not found", json!({ "code": code }))
        })?;

        patch.apply_to(record);
        Ok(record.clone())
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        Ok(self.records.write().await.remove(code).is_some())
    }

    async fn count(&self) -> Result<i64, AppError> {
        Ok(self.records.read().await.len() as i64)
    }
}
