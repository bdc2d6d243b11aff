//! Input checks shared by the services

use bo_shared::utils::{is_valid_email, is_valid_url, normalize_email};

use crate::errors::ValidationError;

/// Trimmed, non-blank text of at most `max` characters
pub(crate) fn required_text(field: &str, value: &str, max: usize) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::required(field));
    }
    if value.chars().count() > max {
        return Err(ValidationError::TooLong {
            field: field.to_string(),
            max,
        });
    }
    Ok(value.to_string())
}

/// Lower-cased, syntactically valid email
pub(crate) fn email(value: &str) -> Result<String, ValidationError> {
    let email = normalize_email(value);
    if email.is_empty() {
        return Err(ValidationError::required("email"));
    }
    if !is_valid_email(&email) {
        return Err(ValidationError::InvalidEmail);
    }
    Ok(email)
}

/// Absolute http(s) URL
pub(crate) fn url(field: &str, value: &str) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::required(field));
    }
    if !is_valid_url(value) {
        return Err(ValidationError::InvalidFormat {
            field: field.to_string(),
        });
    }
    Ok(value.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required_text() {
        assert_eq!(required_text("name", "  Ada ", 10).unwrap(), "Ada");
        assert_eq!(
            required_text("name", "   ", 10).unwrap_err(),
            ValidationError::required("name")
        );
        assert!(matches!(
            required_text("name", "abcdefghijk", 10).unwrap_err(),
            ValidationError::TooLong { max: 10, .. }
        ));
    }

    #[test]
    fn test_email_is_normalized() {
        assert_eq!(email(" Ada@Example.COM ").unwrap(), "ada@example.com");
        assert_eq!(email("nope").unwrap_err(), ValidationError::InvalidEmail);
    }
}
