use super::config::ErrorHandlingConfig;
use serde_json::Value;

/// Keys that are always stripped when redacting, whatever the config says
const ALWAYS_SENSITIVE: [&str; 3] = ["stack", "trace", "internal"];

/// Error sanitization utilities
pub struct ErrorSanitizer;

impl ErrorSanitizer {
    /// Sanitize a JSON value by removing sensitive information
    pub fn sanitize_json_value(value: &mut Value, config: &ErrorHandlingConfig) {
        match value {
            Value::Object(obj) => {
                obj.retain(|key, _| !Self::is_sensitive_key(key, &config.sensitive_patterns));

                // Recursively sanitize nested objects
                for (_, val) in obj.iter_mut() {
                    Self::sanitize_json_value(val, config);
                }
            }
            Value::Array(arr) => {
                for item in arr.iter_mut() {
                    Self::sanitize_json_value(item, config);
                }
            }
            _ => {} // Primitives don't need sanitization
        }
    }

    /// Check if a key contains sensitive information
    pub fn is_sensitive_key(
        key: &str,
        sensitive_patterns: &std::collections::HashSet<String>,
    ) -> bool {
        let key_lower = key.to_lowercase();

        sensitive_patterns
            .iter()
            .any(|pattern| key_lower.contains(pattern.as_str()))
            || ALWAYS_SENSITIVE
                .iter()
                .any(|pattern| key_lower.contains(pattern))
    }
}
