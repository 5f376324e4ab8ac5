//! Error classification
//!
//! Maps a raw error onto one of a closed set of categories, and rewrites the
//! known database/auth categories into user-facing operational errors.

use axum::http::StatusCode;
use serde_json::Value;

use super::operational_error::OperationalError;
use super::raw_error::{ErrorName, RawError};

pub const INVALID_TOKEN_MESSAGE: &str = "Incorrect token please recheck or regenerate the token";
pub const EXPIRED_TOKEN_MESSAGE: &str = "Token has expired. Please login again";

/// Rendered in place of a missing cast path or value
const MISSING: &str = "undefined";

/// Category of an incoming error
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorClass {
    /// Malformed identifier; carries the rendered field name and value
    Cast { path: String, value: String },
    /// Field validation failures, messages in reported order
    Validation { messages: Vec<String> },
    TokenInvalid,
    TokenExpired,
    /// Already self-describing application error
    Operational,
    Unknown,
}

/// Classify a raw error by its discriminant
pub fn classify(error: &RawError) -> ErrorClass {
    match &error.name {
        ErrorName::CastError => ErrorClass::Cast {
            path: error.path.clone().unwrap_or_else(|| MISSING.to_string()),
            value: error
                .value
                .as_ref()
                .map(render_value)
                .unwrap_or_else(|| MISSING.to_string()),
        },
        ErrorName::ValidationError => ErrorClass::Validation {
            messages: error
                .errors
                .iter()
                .map(|failure| failure.message.clone())
                .collect(),
        },
        ErrorName::JsonWebTokenError => ErrorClass::TokenInvalid,
        ErrorName::TokenExpiredError => ErrorClass::TokenExpired,
        ErrorName::AppError | ErrorName::Error | ErrorName::Other(_) => {
            if error.is_operational {
                ErrorClass::Operational
            } else {
                ErrorClass::Unknown
            }
        }
    }
}

impl ErrorClass {
    /// User-facing message for the rewritten categories
    pub fn message(&self) -> Option<String> {
        match self {
            ErrorClass::Cast { path, value } => Some(format!("Invalid {path}: {value}")),
            ErrorClass::Validation { messages } => Some(messages.join(". ")),
            ErrorClass::TokenInvalid => Some(INVALID_TOKEN_MESSAGE.to_string()),
            ErrorClass::TokenExpired => Some(EXPIRED_TOKEN_MESSAGE.to_string()),
            ErrorClass::Operational | ErrorClass::Unknown => None,
        }
    }

    /// Replace `error` with a 400 operational error when this class rewrites,
    /// otherwise pass it through unchanged
    pub fn rewrite(self, error: OperationalError) -> OperationalError {
        match self.message() {
            Some(message) => OperationalError::new(message, StatusCode::BAD_REQUEST),
            None => error,
        }
    }
}

fn render_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
