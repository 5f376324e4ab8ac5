use crate::api::middleware::ErrorHandlingConfig;
use crate::domain::errors::ConfigError;
use crate::domain::Mode;

#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    /// APP_ENV was unset or unrecognized and `mode` fell back to production
    pub mode_defaulted: bool,
    pub listen_addr: String,
    pub jwt_secret: Option<String>,
    pub log_json: bool,
    pub log_client_errors: bool,
    pub redact_leaked_errors: bool,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_vars(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable lookup
    pub fn from_vars<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let (mode, mode_defaulted) = match lookup("APP_ENV").map(|raw| raw.parse::<Mode>()) {
            Some(Ok(mode)) => (mode, false),
            Some(Err(_)) | None => (Mode::Production, true),
        };

        Self {
            mode,
            mode_defaulted,
            listen_addr: lookup("LISTEN_ADDR").unwrap_or_else(|| "0.0.0.0:8080".to_string()),
            jwt_secret: lookup("JWT_SECRET").filter(|s| !s.is_empty()),
            log_json: lookup("LOG_FORMAT")
                .map(|s| s.eq_ignore_ascii_case("json"))
                .unwrap_or(false),
            log_client_errors: lookup("LOG_CLIENT_ERRORS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(true),
            redact_leaked_errors: lookup("REDACT_LEAKED_ERRORS")
                .and_then(|s| s.parse().ok())
                .unwrap_or(false),
        }
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.listen_addr.trim().is_empty() {
            return Err(ConfigError::Invalid {
                key: "LISTEN_ADDR".to_string(),
                value: self.listen_addr.clone(),
                reason: "cannot be empty".to_string(),
            });
        }

        if let Some(secret) = &self.jwt_secret {
            if secret.len() < 16 {
                return Err(ConfigError::Invalid {
                    key: "JWT_SECRET".to_string(),
                    value: "<redacted>".to_string(),
                    reason: "must be at least 16 bytes".to_string(),
                });
            }
        }

        Ok(())
    }

    pub fn error_handling(&self) -> ErrorHandlingConfig {
        ErrorHandlingConfig::default()
            .with_mode(self.mode)
            .with_client_error_logging(self.log_client_errors)
            .with_leak_redaction(self.redact_leaked_errors)
    }
}
