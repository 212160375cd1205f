//! Blog entry domain entity and validation.

use serde::{Deserialize, Serialize};

use crate::config::MAX_URL_LENGTH;
use crate::errors::{AppError, AppResult};

/// A persisted blog-URL record.
///
/// The `id` is a surrogate key assigned by the store on creation and
/// immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Blog {
    pub id: i32,
    pub url: String,
}

/// Validate a blog entry url before persistence.
///
/// The url must be non-empty and at most [`MAX_URL_LENGTH`] characters.
/// Invoked by the store itself so the invariant holds regardless of which
/// caller reaches it.
pub fn validate_url(url: &str) -> AppResult<()> {
    if url.is_empty() {
        return Err(AppError::validation("url must not be empty"));
    }

    if url.chars().count() > MAX_URL_LENGTH as usize {
        return Err(AppError::validation(format!(
            "url must be at most {} characters",
            MAX_URL_LENGTH
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_urls_within_bounds() {
        assert!(validate_url("http://example.com").is_ok());
        assert!(validate_url("x").is_ok());
        assert!(validate_url(&"a".repeat(100)).is_ok());
    }

    #[test]
    fn rejects_empty_url() {
        assert!(matches!(validate_url(""), Err(AppError::Validation(_))));
    }

    #[test]
    fn rejects_overlong_url() {
        assert!(matches!(
            validate_url(&"a".repeat(101)),
            Err(AppError::Validation(_))
        ));
    }

    #[test]
    fn length_is_counted_in_characters() {
        // 100 multi-byte characters are still within bounds
        assert!(validate_url(&"ü".repeat(100)).is_ok());
        assert!(validate_url(&"ü".repeat(101)).is_err());
    }
}
