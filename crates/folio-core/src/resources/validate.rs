//! Client-side validation shared by the resource inputs.

use url::Url;

use crate::error::InvalidInputError;

/// Validation of a form payload before it is submitted.
///
/// Field names in errors are relative to the payload (`grade`, not
/// `educations[1].grade`); batch operations add the prefix.
pub trait Validate {
    fn validate(&self) -> Result<(), InvalidInputError>;
}

/// Prefix the field of a validation error with its position in a list.
pub fn at_index(err: InvalidInputError, list: &str, index: usize) -> InvalidInputError {
    match err {
        InvalidInputError::Field { field, reason } => InvalidInputError::Field {
            field: format!("{}[{}].{}", list, index, field),
            reason,
        },
        other => other,
    }
}

pub(crate) fn is_email(s: &str) -> bool {
    let Some((local, domain)) = s.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !s.chars().any(char::is_whitespace)
        && domain.contains('.')
        && domain.split('.').all(|label| !label.is_empty())
}

pub(crate) fn is_http_url(s: &str) -> bool {
    Url::parse(s).is_ok_and(|url| {
        matches!(url.scheme(), "http" | "https") && url.host_str().is_some()
    })
}

pub(crate) fn is_year(s: &str) -> bool {
    s.len() == 4 && s.bytes().all(|b| b.is_ascii_digit())
}

/// The value of an optional text field, treating blank as absent.
pub(crate) fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

pub(crate) fn required(field: &str, value: &str, message: &str) -> Result<(), InvalidInputError> {
    if value.trim().is_empty() {
        Err(InvalidInputError::field(field, message))
    } else {
        Ok(())
    }
}

pub(crate) fn min_chars(field: &str, value: &str, min: usize) -> Result<(), InvalidInputError> {
    if value.trim().chars().count() < min {
        Err(InvalidInputError::field(
            field,
            format!("must contain at least {} characters", min),
        ))
    } else {
        Ok(())
    }
}

pub(crate) fn optional_url(field: &str, value: &Option<String>) -> Result<(), InvalidInputError> {
    match present(value) {
        Some(v) if !is_http_url(v) => Err(InvalidInputError::field(field, "Invalid URL")),
        _ => Ok(()),
    }
}

pub(crate) fn optional_year(
    field: &str,
    value: &Option<String>,
    example: &str,
) -> Result<(), InvalidInputError> {
    match present(value) {
        Some(v) if !is_year(v) => Err(InvalidInputError::field(
            field,
            format!("Please enter a valid year (e.g., {})", example),
        )),
        _ => Ok(()),
    }
}
