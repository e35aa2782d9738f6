//! Destination URL validation.
//!
//! URLs are stored exactly as submitted; validation only decides whether they
//! are acceptable redirect targets.

use crate::error::AppError;
use serde_json::json;
use url::Url;

/// Errors that make a URL unacceptable as a redirect target.
#[derive(Debug, thiserror::Error)]
pub enum UrlValidationError {
    #[error("URL is empty")]
    Empty,

    #[error("Invalid URL format: {0}")]
    InvalidFormat(String),

    #[error("Only HTTP and HTTPS protocols are allowed")]
    UnsupportedProtocol,

    #[error("URL has no host")]
    MissingHost,

    #[error("URL contains control characters")]
    ControlCharacters,
}

/// Checks that `input` is an absolute URL whose scheme is exactly `http` or `https`.
///
/// `Url::parse` rejects relative references, so anything that parses is absolute.
/// Dangerous schemes such as `javascript:`, `data:` and `file:` are rejected.
///
/// # Errors
///
/// See [`UrlValidationError`].
pub fn check_url(input: &str) -> Result<(), UrlValidationError> {
    if input.trim().is_empty() {
        return Err(UrlValidationError::Empty);
    }

    // The parser silently strips tabs and newlines, but the raw string is what
    // gets stored and later sent back in a Location header.
    if input.chars().any(char::is_control) {
        return Err(UrlValidationError::ControlCharacters);
    }

    let url = Url::parse(input).map_err(|e| UrlValidationError::InvalidFormat(e.to_string()))?;

    match url.scheme() {
        "http" | "https" => {}
        _ => return Err(UrlValidationError::UnsupportedProtocol),
    }

    if url.host_str().is_none_or(str::is_empty) {
        return Err(UrlValidationError::MissingHost);
    }

    Ok(())
}

/// Returns true iff `candidate` is an absolute `http`/`https` URL.
pub fn is_valid_url(candidate: &str) -> bool {
    check_url(candidate).is_ok()
}

/// Validates a destination URL for a new link.
///
/// # Errors
///
/// Returns [`AppError::InvalidUrl`] with the rejection reason in `details`.
pub fn validate_url(input: &str) -> Result<(), AppError> {
    check_url(input).map_err(|e| {
        AppError::invalid_url(
            "URL must be an absolute http or https URL",
            json!({ "reason": e.to_string() }),
        )
    })
}
