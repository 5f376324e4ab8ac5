use axum::http::{Method, Uri};
use tracing::{error, warn};

use super::config::ErrorHandlingConfig;
use crate::domain::OperationalError;

/// Error handling utilities
pub struct ErrorUtils;

impl ErrorUtils {
    /// Log a handled error; server errors always, client errors when configured
    pub fn log_error(
        err: &OperationalError,
        uri: &Uri,
        method: &Method,
        config: &ErrorHandlingConfig,
    ) {
        let status = err.status_code;
        let name = err.raw().name.as_str();

        if status.is_server_error() || !err.is_operational {
            error!(
                %method,
                %uri,
                status = status.as_u16(),
                error.name = name,
                error.operational = err.is_operational,
                "Server error: {}",
                err.message
            );
        } else if config.log_client_errors {
            warn!(
                %method,
                %uri,
                status = status.as_u16(),
                error.name = name,
                "Client error: {}",
                err.message
            );
        }
    }
}
