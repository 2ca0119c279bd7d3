//! Centralized error types for polgraph.

use thiserror::Error;

/// Main error type for polgraph operations.
#[derive(Error, Debug)]
pub enum PolgraphError {
    /// A value object's required field is blank or a bounded field is out of range.
    #[error("Validation error: {0}")]
    Validation(String),

    /// A source record lacks a field every graph representation needs.
    #[error("Mapping error: {0}")]
    Mapping(String),

    /// An unrecognized option value supplied by the caller.
    #[error("Invalid input: {0}")]
    Input(String),

    /// A stored row holds a value its model cannot represent.
    #[error("Invalid stored record: {0}")]
    InvalidRecord(String),

    #[error("Database error: {0}")]
    Database(#[from] polgraph_db::DbError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type for polgraph operations.
pub type PolgraphResult<T> = Result<T, PolgraphError>;

impl PolgraphError {
    /// Create a validation error.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Create a mapping error.
    pub fn mapping(msg: impl Into<String>) -> Self {
        Self::Mapping(msg.into())
    }

    /// Create an invalid-record error.
    pub fn invalid_record(msg: impl Into<String>) -> Self {
        Self::InvalidRecord(msg.into())
    }

    /// Create an input error.
    pub fn input(msg: impl Into<String>) -> Self {
        Self::Input(msg.into())
    }
}
