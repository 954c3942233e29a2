//! Core error types for moodlog-core.
//!
//! The statistics engine itself never fails: sparse or malformed journal data
//! degrades to empty datasets. Errors only come from the edges of the library,
//! i.e. reading configuration, loading snapshots and validating user input.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for moodlog-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Snapshot loading errors
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] SnapshotError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Data directory could not be resolved or created
    #[error("Data directory unavailable: {0}")]
    DataDir(String),
}

/// Errors raised while reading a journal snapshot.
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// Snapshot file could not be read
    #[error("Failed to read snapshot from {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Snapshot content is not valid JSON for the journal model
    #[error("Failed to parse snapshot: {0}")]
    ParseFailed(#[from] serde_json::Error),
}

/// Validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    /// Date could not be parsed
    #[error("Invalid date '{value}': expected YYYY-MM-DD")]
    InvalidDate { value: String },

    /// Unknown metric name
    #[error("Unknown metric: {0}")]
    UnknownMetric(String),

    /// Rating outside of the supported scale
    #[error("Invalid rating {value}: expected 1..={max}")]
    InvalidRating { value: u8, max: u8 },

    /// Numeric argument above its supported maximum
    #[error("{field} must be at most {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        value: u64,
        max: u64,
    },
}

/// Result type alias for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn config_error_converts_into_core_error() {
        let err: CoreError = ConfigError::UnknownKey("thresholds.nope".into()).into();
        assert!(matches!(err, CoreError::Config(_)));
        assert_eq!(
            err.to_string(),
            "Configuration error: Unknown configuration key: thresholds.nope"
        );
    }

    #[test]
    fn validation_error_messages() {
        let err = ValidationError::InvalidDate {
            value: "2024-13-01".into(),
        };
        assert_eq!(err.to_string(), "Invalid date '2024-13-01': expected YYYY-MM-DD");

        let err = ValidationError::InvalidRating { value: 9, max: 5 };
        assert_eq!(err.to_string(), "Invalid rating 9: expected 1..=5");
    }

    #[test]
    fn snapshot_parse_error_wraps_serde() {
        let parse = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err: CoreError = SnapshotError::from(parse).into();
        assert!(err.to_string().starts_with("Snapshot error: Failed to parse snapshot"));
    }
}
