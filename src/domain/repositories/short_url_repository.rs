//! Repository trait for short URL record storage.

use crate::domain::entities::{NewShortUrl, ShortUrl, ShortUrlPatch};
use crate::error::AppError;
use async_trait::async_trait;

/// Record store keyed by short code.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgShortUrlRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::InMemoryShortUrlRepository`] - process-local store
/// - Test mocks available with `cfg(test)`
///
/// # Examples
///
/// See integration tests: `tests/repository_short_url.rs`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ShortUrlRepository: Send + Sync {
    /// Finds a record by its short code.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortUrl>, AppError>;

    /// Inserts a new record.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Conflict`] if a record with the same short code
    /// already exists. Callers treat this as a generation collision.
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn insert(&self, new_short_url: NewShortUrl) -> Result<ShortUrl, AppError>;

    /// Partially updates a record. Only fields present in the patch change.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no record matches `code`.
    /// Returns [`AppError::Internal`] on storage errors.
    async fn update(&self, code: &str, patch: ShortUrlPatch) -> Result<ShortUrl, AppError>;

    /// Removes a record.
    ///
    /// Returns `Ok(true)` if a record was removed, `Ok(false)` if none matched.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn delete(&self, code: &str) -> Result<bool, AppError>;

    /// Counts stored records, expired ones included.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on storage errors.
    async fn count(&self) -> Result<i64, AppError>;
}
