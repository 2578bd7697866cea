//! Short code generation and validation utilities.

use crate::error::AppError;
use rand::Rng;
use rand::distr::Alphanumeric;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Default number of characters in a generated code.
pub const DEFAULT_CODE_LENGTH: usize = 8;

/// Accepted shape of a short code arriving in a request path.
static CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,64}$").expect("valid code regex"));

/// Generates a random short code of `length` characters.
///
/// Characters are drawn uniformly, with repetition, from the 62-character
/// alphanumeric alphabet (`A-Z`, `a-z`, `0-9`). Uniqueness is the caller's
/// responsibility.
///
/// # Examples
///
/// ```ignore
/// let code = generate_code(8);
/// assert_eq!(code.len(), 8);
/// assert!(code.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_code(length: usize) -> String {
    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Validates a short code taken from a request path.
///
/// # Errors
///
/// Returns [`AppError::Validation`] if the code is empty, longer than 64
/// characters, or contains characters outside `A-Z a-z 0-9 _ -`.
pub fn validate_code(code: &str) -> Result<(), AppError> {
    if CODE_REGEX.is_match(code) {
        return Ok(());
    }

    Err(AppError::bad_request(
        "Short code must be 1-64 letters, digits, '-' or '_'",
        json!({ "code": code }),
    ))
}
