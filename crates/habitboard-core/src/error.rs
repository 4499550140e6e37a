//! Core error types for habitboard-core.
//!
//! Registry rejections are user-recoverable and surface as [`RegistryError`];
//! everything else is either a programming error (bad habit type, malformed
//! day-key) or a failure of the backing store or configuration file.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for habitboard-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Registry operation rejected
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// User not configured on this board
    #[error("Unknown user: '{0}'")]
    UnknownUser(String),

    /// Habit type string outside the closed set
    #[error("Invalid habit type: '{0}'")]
    InvalidHabitType(String),

    /// Color theme string outside the closed set
    #[error("Invalid color theme: '{0}'")]
    InvalidColorTheme(String),

    /// Day-key not in `YYYY-MM-DD` form
    #[error("Invalid day key: '{0}' (expected YYYY-MM-DD)")]
    InvalidDayKey(String),

    /// Year-month not in `YYYY-MM` form
    #[error("Invalid month: '{0}' (expected YYYY-MM)")]
    InvalidMonth(String),

    /// Stored log value outside `true | 1 | 2 | absent`
    #[error("Invalid log value: {0}")]
    InvalidLogValue(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Rejections from the per-user habit registry.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// A habit with this id already exists in the user's list
    #[error("Habit '{id}' already exists for {user}")]
    DuplicateId { user: String, id: String },

    /// No habit with this id in the user's list
    #[error("Habit '{id}' not found for {user}")]
    NotFound { user: String, id: String },

    /// Habit name is empty after trimming
    #[error("Habit name must not be empty")]
    InvalidHabitName,
}

/// Database-specific errors.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Migration failed
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Database is locked
    #[error("Database is locked")]
    Locked,
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

impl From<rusqlite::Error> for DatabaseError {
    fn from(err: rusqlite::Error) -> Self {
        match &err {
            rusqlite::Error::SqliteFailure(err, _msg) => {
                if err.code == rusqlite::ErrorCode::DatabaseLocked {
                    DatabaseError::Locked
                } else {
                    DatabaseError::QueryFailed(err.to_string())
                }
            }
            _ => DatabaseError::QueryFailed(err.to_string()),
        }
    }
}

impl From<rusqlite::Error> for CoreError {
    fn from(err: rusqlite::Error) -> Self {
        CoreError::Database(err.into())
    }
}

impl CoreError {
    /// True for rejections a user can fix by changing their input.
    pub fn is_user_error(&self) -> bool {
        matches!(
            self,
            CoreError::Registry(_)
                | CoreError::UnknownUser(_)
                | CoreError::InvalidDayKey(_)
                | CoreError::InvalidMonth(_)
                | CoreError::InvalidColorTheme(_)
        )
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
