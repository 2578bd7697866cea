//! HS256 JSON Web Token implementation of the token authority.

use chrono::{Duration, Utc};
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde_json::json;

use crate::domain::token_authority::{Claims, TokenAuthority};
use crate::error::AppError;

/// Signs and verifies role-bearing JWTs with a shared secret.
pub struct JwtTokenAuthority {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    expiry_seconds: u64,
}

impl JwtTokenAuthority {
    /// Creates an authority for `secret`; issued tokens live `expiry_seconds`.
    pub fn new(secret: &str, expiry_seconds: u64) -> Self {
        let mut validation = Validation::default();
        validation.leeway = 0;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            expiry_seconds,
        }
    }

    /// Lifetime of issued tokens, in seconds.
    pub fn expiry_seconds(&self) -> u64 {
        self.expiry_seconds
    }
}

impl TokenAuthority for JwtTokenAuthority {
    fn verify(&self, token: &str) -> Result<Claims, AppError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| {
                tracing::debug!(error = %e, "Token verification failed");
                AppError::unauthorized(
                    "Invalid or expired token",
                    json!({ "reason": "Token signature or expiry check failed" }),
                )
            })
    }

    fn issue(&self, subject: &str, role: &str) -> Result<String, AppError> {
        let now = Utc::now();
        let expires_at = i64::try_from(self.expiry_seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .and_then(|lifetime| now.checked_add_signed(lifetime))
            .ok_or_else(|| {
                AppError::internal(
                    "Token expiry is out of range",
                    json!({ "expiry_seconds": self.expiry_seconds }),
                )
            })?;

        let claims = Claims {
            sub: Some(subject.to_string()),
            role: role.to_string(),
            iat: now.timestamp(),
            exp: expires_at.timestamp(),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(|e| {
            AppError::internal("Failed to sign token", json!({ "reason": e.to_string() }))
        })
    }
}
