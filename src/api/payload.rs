//! Validated JSON payloads - deserialization combined with validation.

use serde::de::DeserializeOwned;
use validator::Validate;

use crate::errors::{AppError, AppResult};

/// A JSON request body that has already passed validation.
///
/// The dispatcher hands handlers raw body bytes; this is the typed way in.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<T> ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
{
    /// Deserialize and validate a request body.
    pub fn from_bytes(bytes: &[u8]) -> AppResult<Self> {
        let value: T = serde_json::from_slice(bytes)
            .map_err(|e| AppError::bad_request(format!("invalid JSON body: {}", e)))?;

        value
            .validate()
            .map_err(|e| AppError::validation(format_validation_errors(&e)))?;

        Ok(ValidatedJson(value))
    }
}

/// Format validation errors into a user-friendly string
fn format_validation_errors(errors: &validator::ValidationErrors) -> String {
    errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("{} is invalid", field))
            })
        })
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Deserialize, Validate)]
    struct Sample {
        #[validate(length(min = 1, message = "name is required"))]
        name: String,
    }

    #[test]
    fn accepts_valid_payload() {
        let ValidatedJson(sample) =
            ValidatedJson::<Sample>::from_bytes(br#"{"name": "ok"}"#).unwrap();
        assert_eq!(sample.name, "ok");
    }

    #[test]
    fn rejects_malformed_json() {
        let err = ValidatedJson::<Sample>::from_bytes(b"not json").unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[test]
    fn rejects_invalid_fields_with_message() {
        let err = ValidatedJson::<Sample>::from_bytes(br#"{"name": ""}"#).unwrap_err();
        match err {
            AppError::Validation(msg) => assert_eq!(msg, "name is required"),
            other => panic!("expected validation error, got {:?}", other),
        }
    }
}
