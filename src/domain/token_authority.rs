//! Token authority contract and the claims it vouches for.

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Claims carried by a verified bearer token.
///
/// Only `role` is required by access control; `sub` is informational and
/// may be absent from tokens minted elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sub: Option<String>,
    pub role: String,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies signed tokens carrying a role claim.
///
/// # Implementations
///
/// - [`crate::infrastructure::auth::JwtTokenAuthority`] - HS256 JSON Web Tokens
#[cfg_attr(test, mockall::automock)]
pub trait TokenAuthority: Send + Sync {
    /// Verifies signature and expiry, returning the embedded claims.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unauthorized`] if the token is malformed, carries a
    /// bad signature, or has expired.
    fn verify(&self, token: &str) -> Result<Claims, AppError>;

    /// Signs a new token for `subject` with the given `role`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if signing fails.
    fn issue(&self, subject: &str, role: &str) -> Result<String, AppError>;
}
