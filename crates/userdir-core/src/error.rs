//! Unified application error types.
//!
//! All crates map their internal failures into [`AppError`] for consistent
//! propagation through the `?` operator. Store-level failures are assigned a
//! kind by the database crate's classifier; the HTTP layer maps each kind to
//! a status code.

use std::fmt;

use thiserror::Error;

/// Top-level error kind categorization used across the entire application.
///
/// The store-classification subset (`UniqueViolation` through
/// `DeadlineExceeded`) is produced exclusively by the database error
/// classifier so that every repository operation reports failures in the
/// same vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum ErrorKind {
    /// The requested resource was not found.
    NotFound,
    /// Input validation failed.
    Validation,
    /// Missing or invalid credentials.
    Unauthorized,
    /// The caller lacks permission for the action.
    Forbidden,
    /// A unique constraint was violated (duplicate value).
    UniqueViolation,
    /// A foreign key constraint was violated.
    ForeignKeyViolation,
    /// A NOT NULL constraint was violated.
    NullViolation,
    /// A value exceeded its column length.
    DataTooLong,
    /// The generated SQL was rejected by the server.
    SyntaxError,
    /// The operation was canceled before completion.
    Canceled,
    /// The operation deadline elapsed.
    DeadlineExceeded,
    /// Any other database failure.
    Database,
    /// A configuration error occurred.
    Configuration,
    /// An internal server error occurred.
    Internal,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "NOT_FOUND"),
            Self::Validation => write!(f, "VALIDATION"),
            Self::Unauthorized => write!(f, "UNAUTHORIZED"),
            Self::Forbidden => write!(f, "FORBIDDEN"),
            Self::UniqueViolation => write!(f, "UNIQUE_VIOLATION"),
            Self::ForeignKeyViolation => write!(f, "FOREIGN_KEY_VIOLATION"),
            Self::NullViolation => write!(f, "NULL_VIOLATION"),
            Self::DataTooLong => write!(f, "DATA_TOO_LONG"),
            Self::SyntaxError => write!(f, "SYNTAX_ERROR"),
            Self::Canceled => write!(f, "CANCELED"),
            Self::DeadlineExceeded => write!(f, "DEADLINE_EXCEEDED"),
            Self::Database => write!(f, "DATABASE"),
            Self::Configuration => write!(f, "CONFIGURATION"),
            Self::Internal => write!(f, "INTERNAL"),
        }
    }
}

/// The unified application error used throughout the service.
///
/// The original cause is preserved in `source` for diagnostics; only the
/// classification is new. Errors are never retried below the HTTP layer.
#[derive(Debug, Error)]
#[error("{kind}: {message}")]
pub struct AppError {
    /// The category of error.
    pub kind: ErrorKind,
    /// A human-readable error message.
    pub message: String,
    /// Optional underlying cause.
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new application error.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            source: None,
        }
    }

    /// Create a new application error with an underlying cause.
    pub fn with_source(
        kind: ErrorKind,
        message: impl Into<String>,
        source: impl std::error::Error + Send + Sync + 'static,
    ) -> Self {
        Self {
            kind,
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::NotFound, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create an unauthorized error.
    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Unauthorized, message)
    }

    /// Create a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Forbidden, message)
    }

    /// Create a configuration error.
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Configuration, message)
    }

    /// Create an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Internal, message)
    }
}

impl Clone for AppError {
    fn clone(&self) -> Self {
        Self {
            kind: self.kind,
            message: self.message.clone(),
            source: None,
        }
    }
}
