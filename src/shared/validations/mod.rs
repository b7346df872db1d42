//! Custom field validators for `validator` derives

use std::borrow::Cow;

use validator::ValidationError;

/// Phone numbers: optional leading `+`, then 7 to 20 characters of digits,
/// spaces, dashes and parentheses with at least 7 digits.
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    let body = value.strip_prefix('+').unwrap_or(value);
    let allowed = body
        .chars()
        .all(|c| c.is_ascii_digit() || matches!(c, ' ' | '-' | '(' | ')'));
    let digits = body.chars().filter(char::is_ascii_digit).count();

    if allowed && (7..=20).contains(&body.len()) && digits >= 7 {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone");
        err.message = Some(Cow::Borrowed("Invalid phone number format"));
        Err(err)
    }
}

/// Names are measured after trimming: 2 to 100 characters.
pub fn validate_name(value: &str) -> Result<(), ValidationError> {
    let len = value.trim().chars().count();
    if (2..=100).contains(&len) {
        Ok(())
    } else {
        let mut err = ValidationError::new("length");
        err.message = Some(Cow::Borrowed("Name must be between 2 and 100 characters"));
        Err(err)
    }
}

/// Like [`validate_name`], but a blank value passes; the update skips it.
pub fn validate_name_change(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Ok(());
    }
    validate_name(value)
}
