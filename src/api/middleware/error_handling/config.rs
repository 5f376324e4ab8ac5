use serde::{Deserialize, Serialize};
use std::collections::HashSet;

use crate::domain::Mode;

/// Error handling configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorHandlingConfig {
    /// Deployment mode, fixed for the lifetime of the process
    pub mode: Mode,
    /// Whether 4xx responses are logged (5xx always are)
    pub log_client_errors: bool,
    /// Strip sensitive keys from non-operational errors returned in production
    pub redact_leaked_errors: bool,
    /// Key patterns treated as sensitive when redacting
    pub sensitive_patterns: HashSet<String>,
}

impl Default for ErrorHandlingConfig {
    fn default() -> Self {
        let sensitive_patterns = ["password", "secret", "key", "token", "connection", "sql"]
            .into_iter()
            .map(str::to_string)
            .collect();

        Self {
            mode: Mode::default(),
            log_client_errors: true,
            redact_leaked_errors: false,
            sensitive_patterns,
        }
    }
}

impl ErrorHandlingConfig {
    /// Create a new config with custom settings
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Enable/disable client error logging
    pub fn with_client_error_logging(mut self, enabled: bool) -> Self {
        self.log_client_errors = enabled;
        self
    }

    /// Enable/disable redaction of leaked internal errors
    pub fn with_leak_redaction(mut self, enabled: bool) -> Self {
        self.redact_leaked_errors = enabled;
        self
    }

    /// Add a sensitive pattern
    pub fn with_sensitive_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.sensitive_patterns.insert(pattern.into().to_lowercase());
        self
    }
}
