//! Error types for the todo library.

use std::path::PathBuf;

use thiserror::Error;

use crate::models::RecordKind;

/// Comprehensive error type for all todo operations.
#[derive(Error, Debug)]
pub enum TodoError {
    /// Database connection or query errors
    #[error("Database error: {message}: {source}")]
    Database {
        message: String,
        #[source]
        source: rusqlite::Error,
    },
    /// No live record of the given kind has this ID
    #[error("{kind} with ID {id} not found")]
    NotFound { kind: RecordKind, id: u64 },
    /// Star rating outside the accepted range
    #[error("star value out of range. valid range is 0 to 5")]
    StarOutOfRange { star: i64 },
    /// Invalid input validation errors
    #[error("Invalid input for field '{field}': {reason}")]
    InvalidInput { field: String, reason: String },
    /// Serialization/deserialization errors
    #[error("Serialization error: {source}")]
    Serialization {
        #[from]
        source: serde_json::Error,
    },
    /// File system operation errors
    #[error("File system error at path '{path}': {source}")]
    FileSystem {
        path: PathBuf,
        source: std::io::Error,
    },
    /// XDG directory specification errors
    #[error("XDG directory error: {0}")]
    XdgDirectory(String),
    /// Configuration errors
    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

/// Builder for creating database errors with optional context.
pub struct DatabaseErrorBuilder {
    message: String,
}

impl DatabaseErrorBuilder {
    /// Create a new database error builder with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Build the error with the given source.
    pub fn with_source(self, source: rusqlite::Error) -> TodoError {
        TodoError::Database {
            message: self.message,
            source,
        }
    }
}

/// Builder for creating input validation errors.
pub struct InvalidInputBuilder {
    field: String,
}

impl InvalidInputBuilder {
    /// Create a new invalid input error builder for a field.
    pub fn new(field: impl Into<String>) -> Self {
        Self {
            field: field.into(),
        }
    }

    /// Build the error with the given reason.
    pub fn with_reason(self, reason: impl Into<String>) -> TodoError {
        TodoError::InvalidInput {
            field: self.field,
            reason: reason.into(),
        }
    }
}

impl TodoError {
    /// Creates a builder for database errors.
    pub fn database(message: impl Into<String>) -> DatabaseErrorBuilder {
        DatabaseErrorBuilder::new(message)
    }

    /// Creates a builder for input validation errors.
    pub fn invalid_input(field: impl Into<String>) -> InvalidInputBuilder {
        InvalidInputBuilder::new(field)
    }

    /// Returns true when the error reports a missing or soft-deleted record.
    pub fn is_not_found(&self) -> bool {
        matches!(self, TodoError::NotFound { .. })
    }

    pub(crate) fn join(e: tokio::task::JoinError) -> Self {
        TodoError::Configuration {
            message: format!("Task join error: {e}"),
        }
    }
}

/// Specialized extension trait for database-related Results.
pub trait DatabaseResultExt<T> {
    /// Map database errors with a message.
    fn db_context(self, message: &str) -> Result<T>;
}

impl<T> DatabaseResultExt<T> for std::result::Result<T, rusqlite::Error> {
    fn db_context(self, message: &str) -> Result<T> {
        self.map_err(|e| TodoError::database(message).with_source(e))
    }
}

/// Result type alias for todo operations
pub type Result<T> = std::result::Result<T, TodoError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn star_error_message_is_stable() {
        let err = TodoError::StarOutOfRange { star: 7 };
        assert_eq!(
            err.to_string(),
            "star value out of range. valid range is 0 to 5"
        );
    }

    #[test]
    fn not_found_names_kind_and_id() {
        let err = TodoError::NotFound {
            kind: RecordKind::Category,
            id: 42,
        };
        assert_eq!(err.to_string(), "Category with ID 42 not found");
        assert!(err.is_not_found());
    }

    #[test]
    fn db_context_wraps_rusqlite_errors() {
        let result: std::result::Result<(), rusqlite::Error> =
            Err(rusqlite::Error::QueryReturnedNoRows);
        let err = result.db_context("Failed to query todo").unwrap_err();

        match err {
            TodoError::Database { message, .. } => assert_eq!(message, "Failed to query todo"),
            other => panic!("Expected Database error, got {other:?}"),
        }
    }

    #[test]
    fn invalid_input_builder() {
        let err = TodoError::invalid_input("id").with_reason("not a number");
        assert_eq!(err.to_string(), "Invalid input for field 'id': not a number");
        assert!(!err.is_not_found());
    }
}
