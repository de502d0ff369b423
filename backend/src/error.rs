//! Error handling for the Climate Monitor backend
//!
//! Scoring itself never fails; errors come from loading configuration and
//! farm snapshots.

use thiserror::Error;

/// Application error types
#[derive(Error, Debug)]
pub enum AppError {
    // Validation errors
    #[error("Validation error on {field}: {message}")]
    Validation { field: String, message: String },

    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    // Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(#[from] config::ConfigError),

    // Input errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed snapshot: {0}")]
    Json(#[from] serde_json::Error),
}

impl AppError {
    /// Validation failure for a field inside a named record
    pub fn validation(record: &str, index: usize, field: &str, message: &str) -> Self {
        AppError::Validation {
            field: format!("{}[{}].{}", record, index, field),
            message: message.to_string(),
        }
    }

    /// Stable machine-readable code for logs and exit reporting
    pub fn code(&self) -> &'static str {
        match self {
            AppError::Validation { .. } => "VALIDATION_ERROR",
            AppError::InvalidArgument(_) => "INVALID_ARGUMENT",
            AppError::Configuration(_) => "CONFIGURATION_ERROR",
            AppError::Io(_) => "IO_ERROR",
            AppError::Json(_) => "MALFORMED_SNAPSHOT",
        }
    }
}

/// Result type alias for backend operations
pub type AppResult<T> = Result<T, AppError>;
