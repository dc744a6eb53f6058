//! CLI-specific error types

use std::fmt;
use std::io;

use serde_json::Value;

use crate::config::ConfigError;
use crate::package::ErrorMap;

/// CLI error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdin/stdout)
    IoError,
    /// Submission failed validation
    ValidationFailed,
    /// No package with the requested id
    NotFound,
    /// HTTP server could not start or stopped with an error
    ServeFailed,
}

impl CliErrorCode {
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "ZIPPY_CLI_CONFIG_ERROR",
            Self::IoError => "ZIPPY_CLI_IO_ERROR",
            Self::ValidationFailed => "ZIPPY_CLI_VALIDATION_FAILED",
            Self::NotFound => "ZIPPY_CLI_NOT_FOUND",
            Self::ServeFailed => "ZIPPY_CLI_SERVE_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
    details: Option<Value>,
}

impl CliError {
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    /// Validation failure carrying the field errors as details
    pub fn validation_failed(errors: &ErrorMap) -> Self {
        let fields: Vec<&str> = errors.fields().map(|f| f.as_str()).collect();
        Self {
            code: CliErrorCode::ValidationFailed,
            message: format!("Invalid fields: {}", fields.join(", ")),
            details: serde_json::to_value(errors).ok(),
        }
    }

    pub fn not_found(id: &str) -> Self {
        Self::new(CliErrorCode::NotFound, format!("Package not found: {}", id))
    }

    pub fn serve_failed(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ServeFailed, msg)
    }

    pub fn code(&self) -> CliErrorCode {
        self.code
    }

    pub fn code_str(&self) -> &'static str {
        self.code.code()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> Option<&Value> {
        self.details.as_ref()
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::config_error(e.to_string())
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::{validate, Field, PackageForm};

    #[test]
    fn test_display_includes_code() {
        let err = CliError::not_found("abc");
        assert_eq!(err.to_string(), "ZIPPY_CLI_NOT_FOUND: Package not found: abc");
    }

    #[test]
    fn test_validation_failed_details() {
        let mut form = PackageForm::default();
        form.set(Field::SenderName, "Jane");
        let err = CliError::validation_failed(&validate(&form));

        assert_eq!(err.code(), CliErrorCode::ValidationFailed);
        assert!(err.message().starts_with("Invalid fields: senderPhone"));
        let details = err.details().unwrap();
        assert!(details.get("senderName").is_none());
        assert_eq!(details["status"], "Status is required");
    }

    #[test]
    fn test_config_error_conversion() {
        let err: CliError = ConfigError::Invalid("bad".into()).into();
        assert_eq!(err.code_str(), "ZIPPY_CLI_CONFIG_ERROR");
    }
}
