//! Core error types for alarmboard-core.
//!
//! Every error here is recoverable by the user: the view surfaces it inline
//! and waits for the next explicit action. Nothing is retried automatically.

use std::path::PathBuf;
use thiserror::Error;

use crate::alarm::AlarmId;

/// Core error type for alarmboard-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Pattern capture ended with fewer nodes than required
    #[error("Pattern too short: {nodes} node(s) captured, at least {min} required")]
    TooShort { nodes: usize, min: usize },

    /// Confirm capture differs from the candidate pattern
    #[error("Pattern does not match the first drawing")]
    PatternMismatch,

    /// Store operation against an id that is no longer present
    #[error("Alarm not found: {0}")]
    NotFound(AlarmId),

    /// Malformed hour/minute text input
    #[error("Invalid time format: '{0}'")]
    InvalidTimeFormat(String),

    /// Recurrence has no occurrence within the search horizon
    #[error("No occurrence within {horizon_days} days")]
    Unresolvable { horizon_days: i64 },

    /// Store already holds the maximum number of alarms
    #[error("Alarm board is full ({capacity} alarms)")]
    StoreFull { capacity: usize },

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
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

    /// Home/config directory could not be determined or created
    #[error("Configuration directory unavailable: {0}")]
    DirUnavailable(String),
}

/// Validation errors.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Pattern dismissal selected without a saved pattern
    #[error("Pattern dismissal requires a saved pattern")]
    MissingPattern,

    /// Auto-off dismissal selected without a duration
    #[error("Auto-off dismissal requires a duration")]
    MissingAutoTimeout,

    /// Pattern node index outside the 3x3 grid, or repeated
    #[error("Invalid pattern node {node}: {message}")]
    InvalidPatternNode { node: u8, message: String },

    /// "Keep existing" pattern requested when it is not available
    #[error("No existing pattern can be kept at this point")]
    KeepUnavailable,

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

impl CoreError {
    /// Benign races (a deferred gesture resolving against a deleted alarm)
    /// are not reported to the user.
    pub fn is_silent(&self) -> bool {
        matches!(self, CoreError::NotFound(_))
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
