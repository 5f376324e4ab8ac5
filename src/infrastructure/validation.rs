use validator::ValidationErrors;

use crate::domain::{FieldFailure, RawError};

impl From<ValidationErrors> for RawError {
    fn from(errors: ValidationErrors) -> Self {
        // Field errors come out of a HashMap; sort for a stable message order
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|(a, _), (b, _)| a.cmp(b));

        let failures = fields.into_iter().flat_map(|(field, field_errors)| {
            field_errors
                .iter()
                .map(|error| {
                    let message = error
                        .message
                        .as_ref()
                        .map(|cow| cow.to_string())
                        .unwrap_or_else(|| format!("Invalid {field}"));
                    FieldFailure::new(field.to_string(), message)
                })
                .collect::<Vec<_>>()
        });

        RawError::validation(failures)
    }
}
