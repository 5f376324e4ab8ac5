use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid configuration value for {key}: {value} - {reason}")]
    Invalid {
        key: String,
        value: String,
        reason: String,
    },
}
