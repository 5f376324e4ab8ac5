use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::api::middleware::error_handling::error_response;
use crate::domain::{ErrorName, RawError};

/// Error returned by handlers
///
/// The response it produces is a placeholder; the error handling layer
/// replaces it with the formatted JSON body.
#[derive(Debug)]
pub struct ApiError {
    error: RawError,
}

impl ApiError {
    /// Operational error with the given status
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            error: RawError::app(message, status.as_u16()),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(StatusCode::CONFLICT, message)
    }

    /// Unexpected failure; not operational, so its message is never shown
    /// as a user-facing message in production
    pub fn internal_error(message: impl Into<String>) -> Self {
        Self {
            error: RawError::new(ErrorName::Error, message)
                .with_status_code(StatusCode::INTERNAL_SERVER_ERROR.as_u16()),
        }
    }

    pub fn raw(&self) -> &RawError {
        &self.error
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Display::fmt(&self.error, f)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        error_response(self.error)
    }
}

// Convert source errors to API errors

impl From<RawError> for ApiError {
    fn from(error: RawError) -> Self {
        Self { error }
    }
}

impl From<jsonwebtoken::errors::Error> for ApiError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        RawError::from(err).into()
    }
}

impl From<validator::ValidationErrors> for ApiError {
    fn from(err: validator::ValidationErrors) -> Self {
        RawError::from(err).into()
    }
}

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        RawError::from(err).into()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors_are_operational() {
        let err = ApiError::not_found("No account found with that ID");

        assert!(err.raw().is_operational);
        assert_eq!(err.raw().status_code, Some(404));
        assert_eq!(err.raw().status.as_deref(), Some("fail"));
    }

    #[test]
    fn test_internal_error_is_not_operational() {
        let err = ApiError::internal_error("lock poisoned");

        assert!(!err.raw().is_operational);
        assert_eq!(err.raw().status_code, Some(500));
        assert_eq!(err.raw().status, None);
    }

    #[test]
    fn test_into_response_attaches_error() {
        let response = ApiError::conflict("Email already registered").into_response();

        assert_eq!(response.status(), StatusCode::CONFLICT);
        let attached = response.extensions().get::<RawError>().unwrap();
        assert_eq!(attached.message, "Email already registered");
    }

    #[test]
    fn test_from_sqlx_error() {
        let err = ApiError::from(sqlx::Error::RowNotFound);
        assert_eq!(err.raw().status_code, Some(404));
    }
}
