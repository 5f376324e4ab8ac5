//! Upstream error shape
//!
//! `RawError` is what the rest of the application hands to the error
//! responder: a discriminant (`name`), a message, and whatever optional
//! details the producing layer knew about. Nothing here is resolved yet;
//! defaults are applied when it is turned into an [`OperationalError`].
//!
//! [`OperationalError`]: super::operational_error::OperationalError

use std::backtrace::{Backtrace, BacktraceStatus};
use std::fmt::Write as _;

use serde::de::{Deserializer, MapAccess, SeqAccess, Visitor};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::operational_error::status_for_code;

/// Error discriminant
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ErrorName {
    /// Malformed identifier or argument passed to a data lookup
    CastError,
    /// One or more field-level validation failures
    ValidationError,
    /// Token failed its integrity/signature check
    JsonWebTokenError,
    /// Token is past its validity window
    TokenExpiredError,
    /// Raised deliberately by application code
    AppError,
    /// Generic error with no more specific name
    #[default]
    Error,
    Other(String),
}

impl ErrorName {
    pub fn as_str(&self) -> &str {
        match self {
            ErrorName::CastError => "CastError",
            ErrorName::ValidationError => "ValidationError",
            ErrorName::JsonWebTokenError => "JsonWebTokenError",
            ErrorName::TokenExpiredError => "TokenExpiredError",
            ErrorName::AppError => "AppError",
            ErrorName::Error => "Error",
            ErrorName::Other(name) => name,
        }
    }
}

impl From<&str> for ErrorName {
    fn from(name: &str) -> Self {
        match name {
            "CastError" => ErrorName::CastError,
            "ValidationError" => ErrorName::ValidationError,
            "JsonWebTokenError" => ErrorName::JsonWebTokenError,
            "TokenExpiredError" => ErrorName::TokenExpiredError,
            "AppError" => ErrorName::AppError,
            "Error" => ErrorName::Error,
            other => ErrorName::Other(other.to_string()),
        }
    }
}

impl From<String> for ErrorName {
    fn from(name: String) -> Self {
        ErrorName::from(name.as_str())
    }
}

impl From<ErrorName> for String {
    fn from(name: ErrorName) -> Self {
        name.as_str().to_string()
    }
}

impl std::fmt::Display for ErrorName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single field that failed validation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldFailure {
    #[serde(default)]
    pub path: String,
    pub message: String,
}

impl FieldFailure {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

/// Error value as produced by upstream code
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawError {
    #[serde(default)]
    pub name: ErrorName,
    #[serde(default)]
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default)]
    pub is_operational: bool,
    /// Field the offending value was supplied for (cast errors)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
    /// The offending value itself (cast errors)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    /// Per-field failures in the order they were reported (validation errors)
    #[serde(
        default,
        deserialize_with = "deserialize_failures",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub errors: Vec<FieldFailure>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stack: Option<String>,
}

impl RawError {
    pub fn new(name: impl Into<ErrorName>, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            message: message.into(),
            status_code: None,
            status: None,
            is_operational: false,
            path: None,
            value: None,
            errors: Vec::new(),
            stack: None,
        }
    }

    /// Expected, user-facing failure raised by application code
    pub fn app(message: impl Into<String>, status_code: u16) -> Self {
        Self::new(ErrorName::AppError, message)
            .with_status_code(status_code)
            .with_status(status_for_code(status_code))
            .with_operational(true)
    }

    /// Malformed identifier or argument passed to a lookup
    pub fn cast(path: impl Into<String>, value: impl Into<Value>) -> Self {
        let path = path.into();
        let value = value.into();
        let message = format!("Cast failed for value {value} at path \"{path}\"");

        Self::new(ErrorName::CastError, message)
            .with_path(path)
            .with_value(value)
    }

    /// One or more field-level validation failures
    pub fn validation(failures: impl IntoIterator<Item = FieldFailure>) -> Self {
        let errors: Vec<FieldFailure> = failures.into_iter().collect();
        let summary = errors
            .iter()
            .map(|failure| format!("{}: {}", failure.path, failure.message))
            .collect::<Vec<_>>()
            .join(", ");

        let mut error = Self::new(
            ErrorName::ValidationError,
            format!("Validation failed: {summary}"),
        );
        error.errors = errors;
        error
    }

    /// Build from a Rust error, recording its source chain as the stack
    pub fn from_source(
        name: impl Into<ErrorName>,
        source: &(dyn std::error::Error + 'static),
    ) -> Self {
        let name = name.into();
        let stack = render_stack(&name, source);
        Self::new(name, source.to_string()).with_stack(stack)
    }

    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    pub fn with_status_code(mut self, status_code: u16) -> Self {
        self.status_code = Some(status_code);
        self
    }

    pub fn with_status(mut self, status: impl Into<String>) -> Self {
        self.status = Some(status.into());
        self
    }

    pub fn with_operational(mut self, is_operational: bool) -> Self {
        self.is_operational = is_operational;
        self
    }

    pub fn with_path(mut self, path: impl Into<String>) -> Self {
        self.path = Some(path.into());
        self
    }

    pub fn with_value(mut self, value: impl Into<Value>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn with_failure(mut self, failure: FieldFailure) -> Self {
        self.errors.push(failure);
        self
    }

    pub fn with_stack(mut self, stack: impl Into<String>) -> Self {
        self.stack = Some(stack.into());
        self
    }
}

impl std::fmt::Display for RawError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.name, self.message)
    }
}

impl std::error::Error for RawError {}

/// Value side of a failure keyed by its field path
#[derive(Deserialize)]
struct KeyedFailure {
    message: String,
}

/// Accept `errors` as a list of failures or as a map keyed by field path.
/// Map entries keep the order the deserializer yields them in.
fn deserialize_failures<'de, D>(deserializer: D) -> Result<Vec<FieldFailure>, D::Error>
where
    D: Deserializer<'de>,
{
    struct FailuresVisitor;

    impl<'de> Visitor<'de> for FailuresVisitor {
        type Value = Vec<FieldFailure>;

        fn expecting(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str("a list or map of field failures")
        }

        fn visit_unit<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_none<E: serde::de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
            let mut failures = Vec::with_capacity(seq.size_hint().unwrap_or(0));
            while let Some(failure) = seq.next_element::<FieldFailure>()? {
                failures.push(failure);
            }
            Ok(failures)
        }

        fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
            let mut failures = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((path, failure)) = map.next_entry::<String, KeyedFailure>()? {
                failures.push(FieldFailure::new(path, failure.message));
            }
            Ok(failures)
        }
    }

    deserializer.deserialize_any(FailuresVisitor)
}

fn render_stack(name: &ErrorName, source: &(dyn std::error::Error + 'static)) -> String {
    let mut stack = format!("{name}: {source}");

    let mut cause = source.source();
    while let Some(err) = cause {
        let _ = write!(stack, "\n    caused by: {err}");
        cause = err.source();
    }

    // Only present when RUST_BACKTRACE / RUST_LIB_BACKTRACE enable capture
    let backtrace = Backtrace::capture();
    if backtrace.status() == BacktraceStatus::Captured {
        let _ = write!(stack, "\n{backtrace}");
    }

    stack
}
