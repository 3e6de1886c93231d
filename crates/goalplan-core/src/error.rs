//! Core error types for goalplan-core.
//!
//! Soft scheduling failures (a deadline already in the past, no remaining
//! effort) are not represented here: they are logged and yield empty output.
//! These types cover structural problems at the boundary and invariant
//! violations a caller can check up-front.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for goalplan-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Malformed boundary values
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML decoding errors
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
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

    /// Home/config directory could not be resolved
    #[error("Could not resolve configuration directory")]
    NoConfigDir,
}

/// Errors for values that arrive in a non-canonical wire format.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Date is not `YYYY-MM-DD`
    #[error("Invalid date '{0}': expected YYYY-MM-DD")]
    InvalidDate(String),

    /// Time is not `HH:mm`
    #[error("Invalid time '{0}': expected HH:mm")]
    InvalidTime(String),

    /// Weekday name not recognised
    #[error("Invalid weekday '{0}'")]
    InvalidWeekday(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    /// Invalid time range
    #[error("Invalid time range: end ({end}) must be after start ({start})")]
    InvalidTimeRange {
        start: chrono::NaiveTime,
        end: chrono::NaiveTime,
    },

    /// Required text field is blank
    #[error("Field '{0}' must not be empty")]
    EmptyField(String),

    /// Completed effort exceeds the estimate
    #[error("Completed hours ({completed}) exceed estimated hours ({estimated})")]
    EffortExceeded { completed: u32, estimated: u32 },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl From<toml::ser::Error> for CoreError {
    fn from(err: toml::ser::Error) -> Self {
        CoreError::Custom(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
