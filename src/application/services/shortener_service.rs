//! Short URL creation, resolution and lifecycle service.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde_json::json;

use crate::domain::entities::{NewShortUrl, SYSTEM_CREATOR, ShortUrl, ShortUrlPatch};
use crate::domain::repositories::ShortUrlRepository;
use crate::error::AppError;
use crate::utils::code_generator::generate_code;
use crate::utils::url_validator::validate_long_url;

/// Upper bound on generate-and-insert rounds before giving up.
pub const MAX_GENERATION_ATTEMPTS: usize = 10;

/// Input for [`ShortenerService::shorten`].
#[derive(Debug, Clone, Default)]
pub struct ShortenInput {
    pub long_url: String,
    pub uri_name: Option<String>,
    pub expiry_date: Option<DateTime<Utc>>,
    pub user_name: Option<String>,
    pub email: Option<String>,
}

/// Confirmation returned after a record is removed.
#[derive(Debug, Clone, PartialEq)]
pub struct Deletion {
    pub message: String,
    pub short_url_id: String,
}

/// Whether a short code is currently unused.
#[derive(Debug, Clone, PartialEq)]
pub struct Availability {
    pub short_url_id: String,
    pub is_available: bool,
}

/// Service orchestrating code generation, the record store and expiry checks.
///
/// Holds the record store by composition; any [`ShortUrlRepository`]
/// implementation can be plugged in.
pub struct ShortenerService {
    repository: Arc<dyn ShortUrlRepository>,
    base_url: String,
    code_length: usize,
}

impl ShortenerService {
    /// Creates a new service.
    ///
    /// # Arguments
    ///
    /// - `repository` - record store
    /// - `base_url` - prefix of every short link; a trailing `/` is ignored
    /// - `code_length` - number of characters in generated codes
    pub fn new(
        repository: Arc<dyn ShortUrlRepository>,
        base_url: impl Into<String>,
        code_length: usize,
    ) -> Self {
        Self {
            repository,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            code_length,
        }
    }

    /// Builds the full short link for `code`.
    pub fn short_url_for(&self, code: &str) -> String {
        format!("{}/{}", self.base_url, code)
    }

    /// Creates and persists a new short URL record.
    ///
    /// # Code Generation
    ///
    /// A candidate code is generated and checked against the store; taken
    /// codes are regenerated. A unique-key conflict on insert (a concurrent
    /// request won the same code) is also treated as a collision. After
    /// [`MAX_GENERATION_ATTEMPTS`] rounds the request fails.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Validation`] if `long_url` is not a valid HTTP(S) URL.
    /// Returns [`AppError::Internal`] on storage faults or exhausted attempts.
    pub async fn shorten(&self, input: ShortenInput) -> Result<ShortUrl, AppError> {
        self.try_shorten(input)
            .await
            .map_err(|e| e.scoped("creating short URL"))
    }

    async fn try_shorten(&self, input: ShortenInput) -> Result<ShortUrl, AppError> {
        ensure_valid_url(&input.long_url)?;

        let user_name = non_empty(input.user_name);
        let created_by = user_name
            .clone()
            .unwrap_or_else(|| SYSTEM_CREATOR.to_string());

        for attempt in 1..=MAX_GENERATION_ATTEMPTS {
            let code = generate_code(self.code_length);

            if self.repository.find_by_code(&code).await?.is_some() {
                tracing::debug!(attempt, code = %code, "Short code already taken, regenerating");
                continue;
            }

            let new_short_url = NewShortUrl {
                short_url: self.short_url_for(&code),
                short_url_id: code,
                long_url: input.long_url.clone(),
                uri_name: non_empty(input.uri_name.clone()),
                expiry_date: input.expiry_date,
                user_name: user_name.clone(),
                email: non_empty(input.email.clone()),
                created_by: created_by.clone(),
            };

            match self.repository.insert(new_short_url).await {
                Ok(record) => {
                    tracing::info!(
                        code = %record.short_url_id,
                        created_by = %record.created_by,
                        "Short URL created"
                    );
                    return Ok(record);
                }
                Err(AppError::Conflict { .. }) => {
                    tracing::warn!(attempt, "Short code collided on insert, regenerating");
                }
                Err(e) => return Err(e),
            }
        }

        Err(AppError::internal(
            "Failed to generate unique code",
            json!({ "reason": "Too many collisions", "attempts": MAX_GENERATION_ATTEMPTS }),
        ))
    }

    /// Resolves a short code to its long URL.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record matches `code`.
    /// Returns [`AppError::Expired`] if the record's expiry date is in the past.
    /// Returns [`AppError::Internal`] on storage faults.
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        self.try_resolve(code)
            .await
            .map_err(|e| e.scoped("fetching long URL"))
    }

    async fn try_resolve(&self, code: &str) -> Result<String, AppError> {
        let record = self.find_existing(code).await?;

        if record.is_expired() {
            return Err(AppError::expired(
                "This Short URL has expired",
                json!({ "code": code, "expiryDate": record.expiry_date }),
            ));
        }

        Ok(record.long_url)
    }

    /// Returns the full record for `code`, expired or not.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record matches `code`.
    /// Returns [`AppError::Internal`] on storage faults.
    pub async fn get_details(&self, code: &str) -> Result<ShortUrl, AppError> {
        self.find_existing(code)
            .await
            .map_err(|e| e.scoped("fetching URL details"))
    }

    /// Applies a partial update and stamps `update_on` with the current time.
    ///
    /// The short code and short link are never modified.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record matches `code`.
    /// Returns [`AppError::Validation`] if a new `long_url` is invalid.
    /// Returns [`AppError::Internal`] on storage faults.
    pub async fn update(&self, code: &str, patch: ShortUrlPatch) -> Result<ShortUrl, AppError> {
        self.try_update(code, patch)
            .await
            .map_err(|e| e.scoped("updating URL"))
    }

    async fn try_update(&self, code: &str, patch: ShortUrlPatch) -> Result<ShortUrl, AppError> {
        self.find_existing(code).await?;

        if let Some(long_url) = &patch.long_url {
            ensure_valid_url(long_url)?;
        }

        let patch = ShortUrlPatch {
            uri_name: patch.uri_name.map(non_empty),
            update_on: Some(Utc::now()),
            ..patch
        };

        let record = self.repository.update(code, patch).await?;
        tracing::info!(code, "Short URL updated");
        Ok(record)
    }

    /// Removes the record for `code`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record matches `code`.
    /// Returns [`AppError::Internal`] on storage faults.
    pub async fn delete(&self, code: &str) -> Result<Deletion, AppError> {
        self.try_delete(code)
            .await
            .map_err(|e| e.scoped("deleting URL"))
    }

    async fn try_delete(&self, code: &str) -> Result<Deletion, AppError> {
        self.find_existing(code).await?;

        if !self.repository.delete(code).await? {
            return Err(not_found(code));
        }

        tracing::info!(code, "Short URL deleted");
        Ok(Deletion {
            message: "URL deleted successfully".to_string(),
            short_url_id: code.to_string(),
        })
    }

    /// Reports whether `code` is unused.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage faults.
    pub async fn check_availability(&self, code: &str) -> Result<Availability, AppError> {
        let existing = self
            .repository
            .find_by_code(code)
            .await
            .map_err(|e| e.scoped("checking availability"))?;

        Ok(Availability {
            short_url_id: code.to_string(),
            is_available: existing.is_none(),
        })
    }

    async fn find_existing(&self, code: &str) -> Result<ShortUrl, AppError> {
        self.repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| not_found(code))
    }
}

fn not_found(code: &str) -> AppError {
    AppError::not_found("Short URL not found", json!({ "code": code }))
}

fn ensure_valid_url(long_url: &str) -> Result<(), AppError> {
    validate_long_url(long_url).map_err(|e| {
        AppError::bad_request("Invalid URL format", json!({ "reason": e.to_string() }))
    })
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::MockShortUrlRepository;
    use crate::infrastructure::persistence::InMemoryShortUrlRepository;
    use crate::utils::code_generator::DEFAULT_CODE_LENGTH;
    use chrono::Duration;
    use mockall::Sequence;
    use std::collections::HashSet;

    const BASE_URL: &str = "http://localhost:3000/url";

    fn memory_service() -> ShortenerService {
        ShortenerService::new(
            Arc::new(InMemoryShortUrlRepository::new()),
            BASE_URL,
            DEFAULT_CODE_LENGTH,
        )
    }

    fn mock_service(repo: MockShortUrlRepository) -> ShortenerService {
        ShortenerService::new(Arc::new(repo), BASE_URL, DEFAULT_CODE_LENGTH)
    }

    fn input(url: &str) -> ShortenInput {
        ShortenInput {
            long_url: url.to_string(),
            ..Default::default()
        }
    }

    fn stored(code: &str) -> ShortUrl {
        NewShortUrl {
            short_url_id: code.to_string(),
            short_url: format!("{BASE_URL}/{code}"),
            long_url: "https://example.com".to_string(),
            uri_name: None,
            expiry_date: None,
            user_name: None,
            email: None,
            created_by: SYSTEM_CREATOR.to_string(),
        }
        .into_record(Utc::now())
    }

    #[tokio::test]
    async fn test_shorten_example_scenario() {
        let service = memory_service();

        let record = service.shorten(input("https://example.com")).await.unwrap();

        assert_eq!(record.long_url, "https://example.com");
        assert_eq!(record.short_url_id.len(), 8);
        assert!(record.short_url_id.chars().all(|c| c.is_ascii_alphanumeric()));
        assert_eq!(
            record.short_url,
            format!("http://localhost:3000/url/{}", record.short_url_id)
        );
        assert_eq!(record.created_by, "system");
        assert!(record.update_on.is_none());
    }

    #[tokio::test]
    async fn test_shorten_uses_configured_length_and_trims_base_url() {
        let service = ShortenerService::new(
            Arc::new(InMemoryShortUrlRepository::new()),
            "https://sho.rt/",
            12,
        );

        let record = service.shorten(input("https://example.com")).await.unwrap();

        assert_eq!(record.short_url_id.len(), 12);
        assert_eq!(record.short_url, format!("https://sho.rt/{}", record.short_url_id));
    }

    #[tokio::test]
    async fn test_shorten_created_by_defaults_to_user_name() {
        let service = memory_service();

        let record = service
            .shorten(ShortenInput {
                long_url: "https://example.com".to_string(),
                uri_name: Some("Docs".to_string()),
                user_name: Some("alice".to_string()),
                email: Some("alice@example.com".to_string()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(record.created_by, "alice");
        assert_eq!(record.user_name.as_deref(), Some("alice"));
        assert_eq!(record.email.as_deref(), Some("alice@example.com"));
        assert_eq!(record.uri_name.as_deref(), Some("Docs"));
    }

    #[tokio::test]
    async fn test_shorten_empty_user_name_falls_back_to_system() {
        let service = memory_service();

        let record = service
            .shorten(ShortenInput {
                long_url: "https://example.com".to_string(),
                user_name: Some(String::new()),
                ..Default::default()
            })
            .await
            .unwrap();

        assert_eq!(record.created_by, "system");
        assert!(record.user_name.is_none());
    }

    #[tokio::test]
    async fn test_shorten_invalid_url() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_find_by_code().times(0);
        repo.expect_insert().times(0);

        let result = mock_service(repo).shorten(input("not-a-url")).await;

        assert!(matches!(result.unwrap_err(), AppError::Validation { .. }));
    }

    #[tokio::test]
    async fn test_shorten_codes_are_pairwise_distinct() {
        let service = memory_service();
        let mut codes = HashSet::new();

        for i in 0..200 {
            let record = service
                .shorten(input(&format!("https://example.com/{i}")))
                .await
                .unwrap();
            codes.insert(record.short_url_id);
        }

        assert_eq!(codes.len(), 200);
    }

    #[tokio::test]
    async fn test_shorten_regenerates_when_code_exists() {
        let mut repo = MockShortUrlRepository::new();
        let mut seq = Sequence::new();

        repo.expect_find_by_code()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|code| Ok(Some(stored(code))));
        repo.expect_find_by_code()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(None));
        repo.expect_insert()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|new| Ok(new.into_record(Utc::now())));

        let result = mock_service(repo).shorten(input("https://example.com")).await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_shorten_retries_on_insert_conflict() {
        let mut repo = MockShortUrlRepository::new();
        let mut seq = Sequence::new();

        repo.expect_find_by_code().times(2).returning(|_| Ok(None));
        repo.expect_insert()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Err(AppError::conflict("Unique constraint violation", json!({}))));
        repo.expect_insert()
            .times(1)
            .in_sequence(&mut seq)
            .returning(|new| Ok(new.into_record(Utc::now())));

        let record = mock_service(repo)
            .shorten(input("https://example.com"))
            .await
            .unwrap();

        assert_eq!(record.long_url, "https://example.com");
    }

    #[tokio::test]
    async fn test_shorten_gives_up_after_max_attempts() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_find_by_code()
            .times(MAX_GENERATION_ATTEMPTS)
            .returning(|code| Ok(Some(stored(code))));
        repo.expect_insert().times(0);

        let err = mock_service(repo)
            .shorten(input("https://example.com"))
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Internal { .. }));
        assert_eq!(
            err.to_string(),
            "An unexpected error occurred while creating short URL"
        );
    }

    #[tokio::test]
    async fn test_storage_failure_is_collapsed() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_find_by_code().returning(|_| {
            Err(AppError::internal(
                "Database error",
                json!({ "reason": "pool timed out" }),
            ))
        });

        let err = mock_service(repo).get_details("abc12345").await.unwrap_err();

        let info = err.to_error_info();
        assert_eq!(info.code, "internal_error");
        assert_eq!(info.message, "An unexpected error occurred while fetching URL details");
        assert_eq!(info.details, json!({}));
    }

    #[tokio::test]
    async fn test_resolve_round_trip() {
        let service = memory_service();
        let url = "https://example.com/some/path?q=1";

        let record = service.shorten(input(url)).await.unwrap();

        assert_eq!(service.resolve(&record.short_url_id).await.unwrap(), url);
    }

    #[tokio::test]
    async fn test_resolve_not_found() {
        let err = memory_service().resolve("missing1").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_resolve_expiry_boundary() {
        let service = memory_service();

        let past = service
            .shorten(ShortenInput {
                expiry_date: Some(Utc::now() - Duration::seconds(1)),
                ..input("https://example.com/past")
            })
            .await
            .unwrap();
        let future = service
            .shorten(ShortenInput {
                expiry_date: Some(Utc::now() + Duration::seconds(1)),
                ..input("https://example.com/future")
            })
            .await
            .unwrap();

        assert!(matches!(
            service.resolve(&past.short_url_id).await.unwrap_err(),
            AppError::Expired { .. }
        ));
        assert_eq!(
            service.resolve(&future.short_url_id).await.unwrap(),
            "https://example.com/future"
        );
    }

    #[tokio::test]
    async fn test_details_visible_after_expiry() {
        let service = memory_service();
        let record = service
            .shorten(ShortenInput {
                expiry_date: Some(Utc::now() - Duration::hours(1)),
                ..input("https://example.com")
            })
            .await
            .unwrap();

        let details = service.get_details(&record.short_url_id).await.unwrap();

        assert_eq!(details, record);
    }

    #[tokio::test]
    async fn test_update_uri_name_only() {
        let service = memory_service();
        let expiry = Utc::now() + Duration::days(7);
        let record = service
            .shorten(ShortenInput {
                expiry_date: Some(expiry),
                ..input("https://example.com")
            })
            .await
            .unwrap();

        let before = Utc::now();
        let updated = service
            .update(
                &record.short_url_id,
                ShortUrlPatch {
                    uri_name: Some(Some("x".to_string())),
                    ..Default::default()
                },
            )
            .await
            .unwrap();
        let after = Utc::now();

        assert_eq!(updated.uri_name.as_deref(), Some("x"));
        assert_eq!(updated.long_url, "https://example.com");
        assert_eq!(updated.expiry_date, Some(expiry));
        assert_eq!(updated.short_url_id, record.short_url_id);
        assert_eq!(updated.short_url, record.short_url);
        let stamp = updated.update_on.unwrap();
        assert!(stamp >= before && stamp <= after);
    }

    #[tokio::test]
    async fn test_update_rejects_invalid_long_url() {
        let service = memory_service();
        let record = service.shorten(input("https://example.com")).await.unwrap();

        let err = service
            .update(
                &record.short_url_id,
                ShortUrlPatch {
                    long_url: Some("nope".to_string()),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation { .. }));
        assert_eq!(
            service.resolve(&record.short_url_id).await.unwrap(),
            "https://example.com"
        );
    }

    #[tokio::test]
    async fn test_update_not_found() {
        let mut repo = MockShortUrlRepository::new();
        repo.expect_find_by_code().times(1).returning(|_| Ok(None));
        repo.expect_update().times(0);

        let err = mock_service(repo)
            .update("missing1", ShortUrlPatch::default())
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::NotFound { .. }));
    }

    #[tokio::test]
    async fn test_delete_then_details_not_found() {
        let service = memory_service();
        let record = service.shorten(input("https://example.com")).await.unwrap();

        let deletion = service.delete(&record.short_url_id).await.unwrap();
        assert_eq!(deletion.short_url_id, record.short_url_id);
        assert_eq!(deletion.message, "URL deleted successfully");

        assert!(matches!(
            service.get_details(&record.short_url_id).await.unwrap_err(),
            AppError::NotFound { .. }
        ));
        assert!(matches!(
            service.delete(&record.short_url_id).await.unwrap_err(),
            AppError::NotFound { .. }
        ));
    }

    #[tokio::test]
    async fn test_check_availability() {
        let service = memory_service();

        let fresh = service.check_availability("neverUsd").await.unwrap();
        assert!(fresh.is_available);

        let record = service.shorten(input("https://example.com")).await.unwrap();
        let taken = service
            .check_availability(&record.short_url_id)
            .await
            .unwrap();

        assert_eq!(taken.short_url_id, record.short_url_id);
        assert!(!taken.is_available);
    }
}
