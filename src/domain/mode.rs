use serde::{Deserialize, Serialize};

/// Deployment mode controlling how much detail error responses carry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Mode {
    /// Full diagnostics: message, stack and the raw error object
    Development,
    /// Classified, reduced payloads
    #[default]
    Production,
}

impl Mode {
    pub fn is_development(&self) -> bool {
        matches!(self, Mode::Development)
    }
}

impl std::fmt::Display for Mode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Mode::Development => write!(f, "development"),
            Mode::Production => write!(f, "production"),
        }
    }
}

impl std::str::FromStr for Mode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "development" => Ok(Mode::Development),
            "production" => Ok(Mode::Production),
            _ => Err(format!("Invalid deployment mode: {}", s)),
        }
    }
}
