//! Core error types for coursematch-core.
//!
//! This module defines the error hierarchy using thiserror. Wizard and
//! validation errors are recoverable rejections; gateway errors carry the
//! user-facing message shown when a classification attempt fails.

use std::path::PathBuf;
use thiserror::Error;

use crate::wizard::WizardStep;

/// Core error type for coursematch-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Database-related errors
    #[error("Database error: {0}")]
    Database(#[from] DatabaseError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Wizard transition rejected
    #[error(transparent)]
    Wizard(#[from] WizardError),

    /// Classification gateway failure
    #[error(transparent)]
    Gateway(#[from] GatewayError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
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

    /// Stored JSON could not be decoded
    #[error("Corrupt record {id}: {message}")]
    CorruptRecord { id: i64, message: String },
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Could not determine or create the data directory
    #[error("Cannot access data directory {path}: {message}")]
    DataDir { path: PathBuf, message: String },

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
    #[error("unknown config key: {0}")]
    UnknownKey(String),
}

/// Local validation failures that block a wizard transition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Academic step submitted without any subject
    #[error("Please add at least one subject")]
    NoSubjects,

    /// Personality answers missing when scoring was requested
    #[error("{answered} of {total} personality questions answered")]
    IncompleteAnswers { answered: usize, total: usize },

    /// Invalid value
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: String, message: String },
}

/// Rejected wizard operations. None of these change wizard state.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WizardError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Operation is not available on the active step
    #[error("Not available on the {actual} step (requires {expected})")]
    WrongStep {
        expected: WizardStep,
        actual: WizardStep,
    },

    /// A classification request is already awaiting its response
    #[error("A classification request is already in progress")]
    ClassificationInFlight,

    /// Previous question requested on the first question
    #[error("Already at the first question")]
    AtFirstQuestion,
}

/// Failures of the remote classification call.
///
/// `Display` is the message shown to the user; every variant is
/// recoverable by retrying or by going back to edit the profile.
#[derive(Error, Debug)]
pub enum GatewayError {
    /// The service could not be reached
    #[error("Cannot connect to the classification service at {url}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },

    /// Non-success status; message derived from the response body
    #[error("{message}")]
    Status { status: u16, message: String },

    /// Body was empty where content was required
    #[error("{}", empty_response_message(.status))]
    EmptyResponse { status: Option<u16> },

    /// Success status but the body could not be decoded
    #[error("Invalid response format from server")]
    InvalidFormat(#[source] serde_json::Error),

    /// Endpoint could not be built from configuration
    #[error("Invalid classification service URL '{url}': {message}")]
    InvalidUrl { url: String, message: String },

    /// The request could not be sent because local setup failed
    #[error("Cannot prepare the classification request: {0}")]
    Setup(String),
}

fn empty_response_message(status: &Option<u16>) -> String {
    match status {
        Some(code) => format!(
            "Server returned empty response ({code}). Check if the classification service is running."
        ),
        None => "Server returned empty response".to_string(),
    }
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

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
