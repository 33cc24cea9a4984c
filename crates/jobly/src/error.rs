//! Error types for jobly

use crate::types::BindError;
use std::error::Error as _;
use thiserror::Error;

/// Result type alias for jobly operations
pub type JoblyResult<T> = Result<T, JoblyError>;

/// Error types for SQL building and database access
#[derive(Debug, Error)]
pub enum JoblyError {
    /// Caller supplied input that cannot produce a statement (e.g. an empty update)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Row not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// A record with the same key already exists
    #[error("Duplicate: {0}")]
    Duplicate(String),

    /// Database connection error
    #[error("Connection error: {0}")]
    Connection(String),

    /// Query execution error
    #[error("Query error: {0}")]
    Query(#[from] tokio_postgres::Error),

    /// Row decode/mapping error
    #[error("Decode error on column '{column}': {message}")]
    Decode { column: String, message: String },

    /// Pool error
    #[cfg(feature = "pool")]
    #[error("Pool error: {0}")]
    Pool(String),

    /// Missing or malformed configuration
    #[error("Config error: {0}")]
    Config(String),
}

impl JoblyError {
    /// Create an invalid input error
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::InvalidInput(message.into())
    }

    /// Create a not found error
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    /// Create a duplicate error
    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::Duplicate(message.into())
    }

    /// Create a decode error for a specific column
    pub fn decode(column: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Decode {
            column: column.into(),
            message: message.into(),
        }
    }

    /// Check if this is an invalid input error
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }

    /// Check if this is a not found error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }

    /// Whether the error was caused by the request itself.
    ///
    /// HTTP layers map this to `400 Bad Request`.
    pub fn is_bad_request(&self) -> bool {
        matches!(self, Self::InvalidInput(_) | Self::Duplicate(_))
    }

    /// Parse a tokio_postgres error into a more specific JoblyError
    ///
    /// A value that could not be encoded for its parameter (see [`BindError`])
    /// becomes [`JoblyError::InvalidInput`].
    pub fn from_db_error(err: tokio_postgres::Error) -> Self {
        if let Some(bind_err) = err.source().and_then(|e| e.downcast_ref::<BindError>()) {
            return Self::InvalidInput(bind_err.to_string());
        }
        if let Some(db_err) = err.as_db_error() {
            if db_err.code().code() == "23505" {
                let constraint = db_err.constraint().unwrap_or("unknown");
                return Self::Duplicate(format!("{}: {}", constraint, db_err.message()));
            }
        }
        Self::Query(err)
    }
}

#[cfg(feature = "pool")]
impl From<deadpool_postgres::PoolError> for JoblyError {
    fn from(err: deadpool_postgres::PoolError) -> Self {
        Self::Pool(err.to_string())
    }
}
