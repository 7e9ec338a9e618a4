//! Structured errors
//!
//! Errors never crash the system. They are values returned to the caller
//! with a machine-readable code, a message, and where possible a
//! suggestion listing what would have been accepted.

use crate::NumberError;
use serde::{Deserialize, Serialize};

/// Standard error codes (machine-readable)
pub mod codes {
    pub const UNKNOWN_CATEGORY: &str = "UNKNOWN_CATEGORY";
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const INVALID_VALUE: &str = "INVALID_VALUE";
    pub const UNDEFINED_FUNC: &str = "UNDEFINED_FUNC";
    pub const TYPE_ERROR: &str = "TYPE_ERROR";
    pub const ARG_COUNT: &str = "ARG_COUNT";
    pub const ARG_TYPE: &str = "ARG_TYPE";
    pub const DOMAIN_ERROR: &str = "DOMAIN_ERROR";
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const INTERNAL: &str = "INTERNAL";
}

/// Severity level of an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    /// Result returned but degraded
    Warning,
    /// The call failed; caller corrects input and retries
    Error,
    /// Something is broken beyond the caller's input
    Fatal,
}

/// Structured error returned across the plugin and server boundary
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasureError {
    /// Machine-readable error code
    pub code: String,

    /// Human-readable error message
    pub message: String,

    /// Suggestion for fixing the error
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,

    /// Function that produced the error, when known
    #[serde(skip_serializing_if = "Option::is_none")]
    pub function: Option<String>,

    pub severity: Severity,
}

impl MeasureError {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            suggestion: None,
            function: None,
            severity: Severity::Error,
        }
    }

    /// Builder: add suggestion
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    /// Builder: record the function that failed (first one wins)
    pub fn in_function(mut self, name: impl Into<String>) -> Self {
        if self.function.is_none() {
            self.function = Some(name.into());
        }
        self
    }

    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn is_code(&self, code: &str) -> bool {
        self.code == code
    }

    // ========== Common Error Constructors ==========

    pub fn unknown_category(name: &str, valid: &[&str]) -> Self {
        Self::new(codes::UNKNOWN_CATEGORY, format!("Unknown category: {}", name))
            .with_suggestion(format!("Valid categories: {}", valid.join(", ")))
    }

    pub fn unknown_unit(unit: &str, category: &str, valid: &[&str]) -> Self {
        Self::new(codes::UNKNOWN_UNIT, format!("Unknown unit '{}' for {}", unit, category))
            .with_suggestion(format!("Valid units: {}", valid.join(", ")))
    }

    pub fn invalid_value(details: impl Into<String>) -> Self {
        Self::new(codes::INVALID_VALUE, format!("Invalid value: {}", details.into()))
            .with_suggestion("Please enter a valid number.")
    }

    pub fn undefined_func(name: &str) -> Self {
        Self::new(codes::UNDEFINED_FUNC, format!("Unknown function: {}", name))
            .with_suggestion("Use list_functions to see what is available")
    }

    pub fn type_error(expected: &str, got: &str) -> Self {
        Self::new(codes::TYPE_ERROR, format!("Expected {}, got {}", expected, got))
    }

    pub fn arg_count(func: &str, expected: usize, got: usize) -> Self {
        Self::new(codes::ARG_COUNT,
            format!("{}() expects {} arguments, got {}", func, expected, got))
            .with_suggestion(format!("Use help('{}') for usage", func))
    }

    pub fn arg_type(func: &str, arg: &str, expected: &str, got: &str) -> Self {
        Self::new(codes::ARG_TYPE,
            format!("{}() argument '{}': expected {}, got {}", func, arg, expected, got))
    }

    pub fn domain_error(details: impl Into<String>) -> Self {
        Self::new(codes::DOMAIN_ERROR, format!("Domain error: {}", details.into()))
    }

    pub fn not_found(details: impl Into<String>) -> Self {
        Self::new(codes::NOT_FOUND, details)
    }

    pub fn internal(details: impl Into<String>) -> Self {
        Self::new(codes::INTERNAL, format!("Internal error: {}", details.into()))
            .with_suggestion("This is a bug, please report it")
            .with_severity(Severity::Fatal)
    }
}

impl std::fmt::Display for MeasureError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)?;
        if let Some(ref suggestion) = self.suggestion {
            write!(f, " (suggestion: {})", suggestion)?;
        }
        Ok(())
    }
}

impl std::error::Error for MeasureError {}

impl From<NumberError> for MeasureError {
    fn from(err: NumberError) -> Self {
        Self::invalid_value(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code_and_suggestion() {
        let err = MeasureError::unknown_unit("furlongs", "Length", &["meters", "feet"]);
        let text = err.to_string();
        assert!(text.starts_with("[UNKNOWN_UNIT]"));
        assert!(text.contains("furlongs"));
        assert!(text.contains("meters, feet"));
    }

    #[test]
    fn test_from_number_error() {
        let err: MeasureError = NumberError::ParseError("abc".to_string()).into();
        assert!(err.is_code(codes::INVALID_VALUE));
        assert_eq!(err.suggestion.as_deref(), Some("Please enter a valid number."));
    }

    #[test]
    fn test_in_function_keeps_first() {
        let err = MeasureError::domain_error("x")
            .in_function("convert")
            .in_function("outer");
        assert_eq!(err.function.as_deref(), Some("convert"));
    }

    #[test]
    fn test_serialize_skips_empty_fields() {
        let err = MeasureError::new(codes::NOT_FOUND, "nothing here");
        let json = serde_json::to_value(&err).unwrap();
        assert_eq!(json["code"], "NOT_FOUND");
        assert_eq!(json["severity"], "error");
        assert!(json.get("suggestion").is_none());
        assert!(json.get("function").is_none());
    }

    #[test]
    fn test_internal_is_fatal() {
        assert_eq!(MeasureError::internal("boom").severity, Severity::Fatal);
    }
}
