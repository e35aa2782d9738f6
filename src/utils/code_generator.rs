//! Short code generation and validation utilities.
//!
//! Codes are 6-8 characters drawn from the 62-character alphabet `[A-Za-z0-9]`.
//! Generated codes are uniformly random but not cryptographically secure;
//! uniqueness is enforced by the store, not by the generator.

use crate::error::AppError;
use rand::{Rng, distr::Alphanumeric};
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Length of codes produced when the caller does not ask for another one.
pub const DEFAULT_CODE_LENGTH: usize = 6;

pub const MIN_CODE_LENGTH: usize = 6;
pub const MAX_CODE_LENGTH: usize = 8;

/// Compiled pattern every stored code must match.
static CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]{6,8}$").unwrap());

/// Generates a random code of [`DEFAULT_CODE_LENGTH`] characters.
///
/// # Examples
///
/// ```
/// use snaplink::utils::code_generator::{generate_code, is_valid_code};
///
/// let code = generate_code();
/// assert_eq!(code.len(), 6);
/// assert!(is_valid_code(&code));
/// ```
pub fn generate_code() -> String {
    generate_code_with_length(DEFAULT_CODE_LENGTH)
}

/// Generates a random code of `length` characters.
///
/// Each character is drawn independently and uniformly from `[A-Za-z0-9]`.
/// `length` is clamped to the 6-8 range so the result is always a storable code.
pub fn generate_code_with_length(length: usize) -> String {
    let length = length.clamp(MIN_CODE_LENGTH, MAX_CODE_LENGTH);

    rand::rng()
        .sample_iter(&Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Returns true iff `candidate` matches `^[A-Za-z0-9]{6,8}$`.
pub fn is_valid_code(candidate: &str) -> bool {
    CODE_REGEX.is_match(candidate)
}

/// Validates a user-provided custom short code.
///
/// # Errors
///
/// Returns [`AppError::InvalidCodeFormat`] if the code is not 6-8 ASCII
/// letters or digits.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if is_valid_code(code) {
        return Ok(());
    }

    Err(AppError::invalid_code_format(
        "Custom code must be 6-8 characters of letters and digits",
        json!({ "code": code, "provided_length": code.chars().count() }),
    ))
}
