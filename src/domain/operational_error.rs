use axum::http::StatusCode;

use super::raw_error::RawError;

/// Status string used when an error arrives without one
pub const DEFAULT_STATUS: &str = "error";

/// Category string for a status code: "fail" for 4xx, "error" otherwise
pub fn status_for_code(status_code: u16) -> &'static str {
    if (400..500).contains(&status_code) {
        "fail"
    } else {
        "error"
    }
}

/// An error with every field the emission step needs resolved
///
/// Built once per failed request, either from a [`RawError`] (applying the
/// 500 / `"error"` defaults) or manufactured by the classifier. The resolved
/// values are mirrored back into the carried raw error so that the raw
/// object shown in development, or leaked in production, agrees with them.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationalError {
    pub message: String,
    pub status_code: StatusCode,
    pub status: String,
    pub is_operational: bool,
    pub stack: Option<String>,
    raw: RawError,
}

impl OperationalError {
    /// Manufacture an operational error for the given status
    pub fn new(message: impl Into<String>, status_code: StatusCode) -> Self {
        Self::from(RawError::app(message, status_code.as_u16()))
    }

    /// The raw error with defaults applied
    pub fn raw(&self) -> &RawError {
        &self.raw
    }

    pub fn into_raw(self) -> RawError {
        self.raw
    }
}

impl From<RawError> for OperationalError {
    fn from(mut raw: RawError) -> Self {
        // Out-of-range codes are treated the same as missing ones
        let status_code = raw
            .status_code
            .and_then(|code| StatusCode::from_u16(code).ok())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let status = raw
            .status
            .clone()
            .unwrap_or_else(|| DEFAULT_STATUS.to_string());

        raw.status_code = Some(status_code.as_u16());
        raw.status = Some(status.clone());

        Self {
            message: raw.message.clone(),
            status_code,
            status,
            is_operational: raw.is_operational,
            stack: raw.stack.clone(),
            raw,
        }
    }
}
