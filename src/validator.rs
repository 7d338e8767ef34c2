//! `ValidatedJson<T>`: JSON body extractor that also runs `validator` rules.
//!
//! Every rejection is a 400 with a readable detail: missing fields, wrong
//! types, unparsable JSON, a missing content type, or failed validation rules.

use anyhow::anyhow;
use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use marketdash_core::AppError;
use serde::de::DeserializeOwned;
use validator::{Validate, ValidationErrors};

pub(crate) fn format_errors(errors: &ValidationErrors) -> String {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errors)| {
            errors.iter().map(move |error| match (&**field, &error.message) {
                // struct-level rules
                ("__all__", Some(msg)) => msg.to_string(),
                ("__all__", None) => "request is invalid".to_string(),
                (field, Some(msg)) => format!("{field}: {msg}"),
                (field, None) => format!("{field} is invalid"),
            })
        })
        .collect();
    // HashMap iteration order is not stable.
    messages.sort();
    messages.join(", ")
}

fn rejection_message(rejection: &JsonRejection) -> String {
    let body = rejection.body_text();

    if let Some(field) = body
        .split("missing field `")
        .nth(1)
        .and_then(|s| s.split('`').next())
    {
        return format!("{field} is required");
    }

    match rejection {
        JsonRejection::MissingJsonContentType(_) => {
            "Missing 'Content-Type: application/json' header".to_string()
        }
        JsonRejection::JsonSyntaxError(_) => "Malformed JSON in request body".to_string(),
        JsonRejection::JsonDataError(_) if body.contains("invalid type") => {
            "Invalid field type in request".to_string()
        }
        JsonRejection::JsonDataError(_) if body.contains("unknown variant") => {
            "Invalid value for an enumerated field".to_string()
        }
        _ => "Invalid request body".to_string(),
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(rejection = %rejection.body_text(), "request body rejected");
                AppError::bad_request(anyhow!(rejection_message(&rejection)))
            })?;

        value
            .validate()
            .map_err(|errors| AppError::bad_request(anyhow!(format_errors(&errors))))?;

        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    #[test]
    fn test_format_errors_is_sorted_and_labelled() {
        let mut errors = ValidationErrors::new();
        errors.add("title", ValidationError::new("length"));
        errors.add(
            "budget",
            ValidationError::new("range").with_message("must not be negative".into()),
        );
        assert_eq!(
            format_errors(&errors),
            "budget: must not be negative, title is invalid"
        );
    }

    #[test]
    fn test_struct_level_errors_drop_the_field_label() {
        let mut errors = ValidationErrors::new();
        errors.add(
            "__all__",
            ValidationError::new("date_range")
                .with_message("end_date must not be before start_date".into()),
        );
        assert_eq!(
            format_errors(&errors),
            "end_date must not be before start_date"
        );
    }
}
