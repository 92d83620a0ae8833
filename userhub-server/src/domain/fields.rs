use super::error::DomainError;

pub(crate) const TITLE_MAX_CHARS: usize = 255;
pub(crate) const STATE_MAX_CHARS: usize = 2;
pub(crate) const COUNTRY_MAX_CHARS: usize = 4;
pub(crate) const AVATAR_MAX_CHARS: usize = 255;

pub(crate) fn validate_positive_i64(field: &'static str, value: i64) -> Result<(), DomainError> {
    if value <= 0 {
        return Err(DomainError::Validation {
            field,
            message: "must be > 0",
        });
    }
    Ok(())
}

/// Checks an optional title without altering it: the stored value is exactly
/// what the caller sent.
pub(crate) fn validate_title(title: Option<&str>) -> Result<(), DomainError> {
    let Some(title) = title else {
        return Ok(());
    };
    if title.trim().is_empty() || title.chars().count() > TITLE_MAX_CHARS {
        return Err(DomainError::Validation {
            field: "title",
            message: "must be 1..255 chars",
        });
    }
    Ok(())
}

pub(crate) fn validate_max_chars(
    field: &'static str,
    value: Option<&str>,
    max: usize,
    message: &'static str,
) -> Result<(), DomainError> {
    match value {
        Some(value) if value.chars().count() > max => {
            Err(DomainError::Validation { field, message })
        }
        _ => Ok(()),
    }
}
