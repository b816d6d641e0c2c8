//! Application error types
//!
//! Errors raised while configuring and running the screening, wrapping the
//! rule engine's own [`GuardError`].

use guards_rules::GuardError;

use crate::config::ConfigError;
use crate::middleware::fields::FieldError;

/// Application-wide error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),

    #[error("Rule error: {0}")]
    Rule(#[from] GuardError),

    #[error("Invalid rule configuration: {0}")]
    InvalidRule(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("File error: {0}")]
    File(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Log field error: {0}")]
    Field(#[from] FieldError),
}

impl AppError {
    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(_) => "CONFIGURATION_ERROR",
            Self::Rule(err) => err.error_code(),
            Self::InvalidRule(_) => "INVALID_RULE",
            Self::Validation(_) => "VALIDATION_ERROR",
            Self::File(_) => "FILE_ERROR",
            Self::Serialization(_) => "SERIALIZATION_ERROR",
            Self::Field(_) => "LOG_FIELD_ERROR",
        }
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Validation(err.to_string())
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
