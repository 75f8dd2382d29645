//! Request validation for the transport layer.
//!
//! These checks run before anything reaches the workflow core: malformed
//! input is user-correctable and maps to a 400.

use crate::error::ApiError;
use regex::Regex;
use std::sync::LazyLock;

/// Maximum accepted document payload (5 MiB).
pub const MAX_DOCUMENT_BYTES: usize = 5 * 1024 * 1024;

/// Minimum registration password length.
pub const MIN_PASSWORD_LEN: usize = 6;

static EMAIL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern"));

static PHONE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\+?[\d\s\-()]{10,}$").expect("phone pattern"));

/// Content types accepted for document uploads.
const ALLOWED_CONTENT_TYPES: &[&str] =
    &["image/jpeg", "image/jpg", "image/png", "application/pdf"];

pub fn email(value: &str) -> Result<(), ApiError> {
    if EMAIL_RE.is_match(value) {
        Ok(())
    } else {
        Err(ApiError::Validation("Invalid email format".to_string()))
    }
}

pub fn phone(value: &str) -> Result<(), ApiError> {
    if PHONE_RE.is_match(value) {
        Ok(())
    } else {
        Err(ApiError::Validation(
            "Invalid phone number format".to_string(),
        ))
    }
}

pub fn password(value: &str) -> Result<(), ApiError> {
    if value.len() >= MIN_PASSWORD_LEN {
        Ok(())
    } else {
        Err(ApiError::Validation(format!(
            "Password must be at least {MIN_PASSWORD_LEN} characters long"
        )))
    }
}

pub fn document_content_type(content_type: &str) -> Result<(), ApiError> {
    if ALLOWED_CONTENT_TYPES.contains(&content_type) {
        Ok(())
    } else {
        Err(ApiError::Validation(
            "Invalid file type. Only JPEG, PNG, JPG, and PDF files are allowed.".to_string(),
        ))
    }
}

pub fn document_size(len: usize) -> Result<(), ApiError> {
    if len <= MAX_DOCUMENT_BYTES {
        Ok(())
    } else {
        Err(ApiError::Validation(
            "File too large. Maximum size is 5MB.".to_string(),
        ))
    }
}
