//! Long URL validation.
//!
//! URLs are stored exactly as submitted so that resolution returns the same
//! string; this module only decides whether the input is acceptable.

use url::Url;

/// Errors that can occur during URL validation.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL must include a host")]
    MissingHost,

    #[error("URL must not contain whitespace or control characters")]
    UnsafeCharacters,
}

/// Checks that `input` is an absolute HTTP(S) URL with a host.
///
/// # Security
///
/// Rejects potentially dangerous protocols like `javascript:`, `data:`, `file:`, etc.
///
/// # Errors
///
/// Returns [`UrlValidationError::InvalidFormat`] for malformed URLs,
/// [`UrlValidationError::UnsupportedProtocol`] for non-HTTP(S) schemes and
/// [`UrlValidationError::MissingHost`] when no host is present.
///
/// Returns [`UrlValidationError::UnsafeCharacters`] for any whitespace or
/// control character. The URL parser would silently strip or encode them,
/// but the stored string is sent verbatim as the `Location` header.
pub fn validate_long_url(input: &str) -> Result<(), UrlValidationError> {
    if input
        .chars()
        .any(|c| c.is_whitespace() || c.is_control())
    {
        return Err(UrlValidationError::UnsafeCharacters);
    }

    let url = Url::parse(input)
        .map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    match url.host_str() {
        Some(host) if !host.is_empty() => Ok(()),
        _ => Err(UrlValidationError::MissingHost),
    }
}
