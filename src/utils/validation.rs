use crate::utils::error::{AppError, Result};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

pub const EMAIL_REQUIRED_MESSAGE: &str = "Email is required";
pub const EMAIL_INVALID_MESSAGE: &str = "Enter a valid email address";

// Unanchored on purpose: any `local@domain.tld` run inside the input passes.
static EMAIL_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^\s@]+@[^\s@]+\.[^\s@]+").expect("email shape pattern is valid")
});

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<Url> {
    if url_str.is_empty() {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(url),
            scheme => Err(AppError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(AppError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}

/// Local shape check run before any magic-link request.
///
/// Only the empty string counts as missing; whitespace falls through to the
/// shape check and fails there.
pub fn validate_email(field_name: &str, email: &str) -> Result<()> {
    if email.is_empty() {
        return Err(AppError::ValidationError {
            field: field_name.to_string(),
            message: EMAIL_REQUIRED_MESSAGE.to_string(),
        });
    }

    if !EMAIL_SHAPE.is_match(email) {
        return Err(AppError::ValidationError {
            field: field_name.to_string(),
            message: EMAIL_INVALID_MESSAGE.to_string(),
        });
    }

    Ok(())
}
