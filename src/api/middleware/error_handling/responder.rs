//! Terminal error stage
//!
//! [`ErrorResponder`] turns any [`RawError`] into exactly one JSON response.
//! In development the error is echoed back in full. In production it is
//! classified first and only operational messages are exposed.

use serde_json::json;

use super::config::ErrorHandlingConfig;
use super::sanitizers::ErrorSanitizer;
use super::sink::ResponseSink;
use crate::domain::{classify, Mode, OperationalError, RawError};

/// Formats errors into HTTP JSON responses
#[derive(Debug, Clone, Default)]
pub struct ErrorResponder {
    config: ErrorHandlingConfig,
}

impl ErrorResponder {
    pub fn new(mode: Mode) -> Self {
        Self::from_config(ErrorHandlingConfig::default().with_mode(mode))
    }

    pub fn from_config(config: ErrorHandlingConfig) -> Self {
        Self { config }
    }

    pub fn mode(&self) -> Mode {
        self.config.mode
    }

    pub fn config(&self) -> &ErrorHandlingConfig {
        &self.config
    }

    /// Write the response for `error` to `sink`
    ///
    /// Writes exactly once and never fails. Returns the error as it was
    /// emitted (after classification in production) for logging.
    pub fn handle<S: ResponseSink>(&self, error: RawError, sink: &mut S) -> OperationalError {
        match self.config.mode {
            Mode::Development => {
                let err = OperationalError::from(error);
                Self::send_development(&err, sink);
                err
            }
            Mode::Production => {
                let err = Self::resolve_production(error);
                self.send_production(&err, sink);
                err
            }
        }
    }

    /// Apply defaults, then rewrite known database/auth errors
    pub fn resolve_production(error: RawError) -> OperationalError {
        let class = classify(&error);
        class.rewrite(OperationalError::from(error))
    }

    fn send_development<S: ResponseSink>(err: &OperationalError, sink: &mut S) {
        sink.status(err.status_code).json(json!({
            "status": err.status,
            "message": err.message,
            "stack": err.stack,
            "error": err.raw(),
        }));
    }

    fn send_production<S: ResponseSink>(&self, err: &OperationalError, sink: &mut S) {
        if err.is_operational {
            sink.status(err.status_code).json(json!({
                "status": err.status,
                "message": err.message,
            }));
            return;
        }

        // Unclassified internal error: the raw object goes out as-is and the
        // status already on the sink is left alone
        let mut raw = json!(err.raw());
        if self.config.redact_leaked_errors {
            ErrorSanitizer::sanitize_json_value(&mut raw, &self.config);
        }
        sink.json(json!({ "err": raw }));
    }
}
