//! PostgreSQL implementation of the short URL repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{NewShortUrl, ShortUrl, ShortUrlPatch};
use crate::domain::repositories::ShortUrlRepository;
use crate::error::AppError;

const COLUMNS: &str = "short_url_id, short_url, long_url, uri_name, expiry_date, \
                       user_name, email, created_by, created_at, update_on";

/// Row shape of the `short_urls` table.
#[derive(Debug, sqlx::FromRow)]
struct ShortUrlRow {
    short_url_id: String,
    short_url: String,
    long_url: String,
    uri_name: Option<String>,
    expiry_date: Option<DateTime<Utc>>,
    user_name: Option<String>,
    email: Option<String>,
    created_by: String,
    created_at: DateTime<Utc>,
    update_on: Option<DateTime<Utc>>,
}

impl From<ShortUrlRow> for ShortUrl {
    fn from(row: ShortUrlRow) -> Self {
        ShortUrl {
            short_url_id: row.short_url_id,
            short_url: row.short_url,
            long_url: row.long_url,
            uri_name: row.uri_name,
            expiry_date: row.expiry_date,
            user_name: row.user_name,
            email: row.email,
            created_by: row.created_by,
            created_at: row.created_at,
            update_on: row.update_on,
        }
    }
}

/// PostgreSQL repository for short URL records.
///
/// Uses bound parameters for SQL injection protection. The primary key on
/// `short_url_id` turns a duplicate insert into [`AppError::Conflict`].
pub struct PgShortUrlRepository {
    pool: Arc<PgPool>,
}

impl PgShortUrlRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ShortUrlRepository for PgShortUrlRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortUrl>, AppError> {
        let row = sqlx::query_as::<_, ShortUrlRow>(&format!(
            "SELECT {COLUMNS} FROM short_urls WHERE short_url_id = $1"
        ))
        .bind(code)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(ShortUrl::from))
    }

    async fn insert(&self, new_short_url: NewShortUrl) -> Result<ShortUrl, AppError> {
        let row = sqlx::query_as::<_, ShortUrlRow>(&format!(
            r#"
            INSERT INTO short_urls
                (short_url_id, short_url, long_url, uri_name, expiry_date, user_name, email, created_by)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            RETURNING {COLUMNS}
            "#
        ))
        .bind(new_short_url.short_url_id)
        .bind(new_short_url.short_url)
        .bind(new_short_url.long_url)
        .bind(new_short_url.uri_name)
        .bind(new_short_url.expiry_date)
        .bind(new_short_url.user_name)
        .bind(new_short_url.email)
        .bind(new_short_url.created_by)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn update(&self, code: &str, patch: ShortUrlPatch) -> Result<ShortUrl, AppError> {
        let set_uri_name = patch.uri_name.is_some();
        let set_expiry = patch.expiry_date.is_some();

        let row = sqlx::query_as::<_, ShortUrlRow>(&format!(
            r#"
            UPDATE short_urls
            SET long_url    = COALESCE($2, long_url),
                uri_name    = CASE WHEN $3 THEN $4 ELSE uri_name END,
                expiry_date = CASE WHEN $5 THEN $6 ELSE expiry_date END,
                update_on   = COALESCE($7, update_on)
            WHERE short_url_id = $1
            RETURNING {COLUMNS}
            "#
        ))
        .bind(code)
        .bind(patch.long_url)
        .bind(set_uri_name)
        .bind(patch.uri_name.flatten())
        .bind(set_expiry)
        .bind(patch.expiry_date.flatten())
        .bind(patch.update_on)
        .fetch_optional(self.pool.as_ref())
        .await?;

        row.map(ShortUrl::from)
            .ok_or_else(|| AppError::not_found("Short URL not found", json!({ "code": code })))
    }

    async fn delete(&self, code: &str) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM short_urls WHERE short_url_id = $1")
            .bind(code)
            .execute(self.pool.as_ref())
            .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn count(&self) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM short_urls")
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }
}
