//! Unified error hierarchy for bmirs
//!
//! All errors are recovered at the command boundary: validation failures
//! surface a user-facing message and no result is computed.

use std::path::PathBuf;
use thiserror::Error;

/// Top-level error type for all bmirs operations
#[derive(Debug, Error)]
pub enum BmirsError {
    /// Input validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Derivation/calculation errors
    #[error("Calculation error: {0}")]
    Calculation(#[from] CalculationError),

    /// History/session store errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Input validation errors
#[derive(Debug, Error)]
pub enum ValidationError {
    /// Measurement value is non-finite, non-positive, or unparsable
    #[error("Invalid {kind} measurement: {reason}")]
    InvalidMeasurement { kind: String, reason: String },

    /// A required selection is absent
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    /// A value falls outside the declared bounds
    #[error("{field} out of range: {value} (allowed {min}-{max})")]
    OutOfRange {
        field: String,
        value: String,
        min: String,
        max: String,
    },
}

/// Derivation errors
#[derive(Debug, Error)]
pub enum CalculationError {
    /// Result failed the sanity bound
    #[error("Implausible result for {calculation}: {value}")]
    ImplausibleResult { calculation: String, value: String },

    /// Division by zero
    #[error("Division by zero in {calculation}")]
    DivisionByZero { calculation: String },
}

/// History and session store errors
#[derive(Debug, Error)]
pub enum StorageError {
    /// Stored data could not be decoded
    #[error("Corrupted store at {path}: {reason}")]
    Corrupted { path: PathBuf, reason: String },

    /// Write to the backing store failed
    #[error("Write failed for {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },
}

/// Result type alias for bmirs operations
pub type Result<T> = std::result::Result<T, BmirsError>;

impl BmirsError {
    /// Get error severity level
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            BmirsError::Validation(_) => ErrorSeverity::Warning,
            BmirsError::Calculation(_) => ErrorSeverity::Warning,
            BmirsError::Storage(_) => ErrorSeverity::Error,
            BmirsError::Configuration(_) => ErrorSeverity::Error,
            BmirsError::Io(_) => ErrorSeverity::Error,
        }
    }

    /// Get user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            BmirsError::Validation(ValidationError::MissingField { field }) => {
                format!("Please select your {}.", field)
            }
            BmirsError::Validation(ValidationError::OutOfRange {
                field, min, max, ..
            }) => {
                format!("{} must be between {}-{} (or equivalent).", field, min, max)
            }
            BmirsError::Validation(ValidationError::InvalidMeasurement { kind, .. }) => {
                format!("Please enter a valid {}.", kind)
            }
            BmirsError::Storage(_) => {
                "Failed to access saved records. Please try again.".to_string()
            }
            _ => self.to_string(),
        }
    }
}

/// Error severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Error that prevents the operation but the session can continue
    Error,
    /// Recoverable input problem; re-prompt and retry
    Warning,
}

impl ErrorSeverity {
    /// Convert to tracing level
    pub fn to_tracing_level(&self) -> tracing::Level {
        match self {
            ErrorSeverity::Error => tracing::Level::ERROR,
            ErrorSeverity::Warning => tracing::Level::WARN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_severity() {
        let err = BmirsError::Validation(ValidationError::MissingField {
            field: "gender".to_string(),
        });
        assert_eq!(err.severity(), ErrorSeverity::Warning);

        let err = BmirsError::Configuration("bad key".to_string());
        assert_eq!(err.severity(), ErrorSeverity::Error);
    }

    #[test]
    fn test_user_messages() {
        let err = BmirsError::Validation(ValidationError::OutOfRange {
            field: "Height".to_string(),
            value: "20".to_string(),
            min: "50".to_string(),
            max: "300".to_string(),
        });
        assert_eq!(
            err.user_message(),
            "Height must be between 50-300 (or equivalent)."
        );

        let err = BmirsError::Validation(ValidationError::MissingField {
            field: "gender".to_string(),
        });
        assert!(err.user_message().contains("gender"));
    }
}
