//! Store error classification.
//!
//! Every repository operation funnels its failures through
//! [`classify_sqlx`] so that the HTTP layer sees one consistent vocabulary
//! of error kinds regardless of which query failed. The original cause is
//! preserved as the error source.

use userdir_core::error::{AppError, ErrorKind};

/// PostgreSQL error code: unique constraint violation.
pub const PG_UNIQUE_VIOLATION: &str = "23505";
/// PostgreSQL error code: foreign key constraint violation.
pub const PG_FOREIGN_KEY_VIOLATION: &str = "23503";
/// PostgreSQL error code: NOT NULL constraint violation.
pub const PG_NOT_NULL_VIOLATION: &str = "23502";
/// PostgreSQL error code: string data right truncation (value too long).
pub const PG_STRING_DATA_RIGHT_TRUNCATION: &str = "22001";
/// PostgreSQL error code: SQL syntax error.
pub const PG_SYNTAX_ERROR: &str = "42601";
/// PostgreSQL error code: query canceled (e.g. statement_timeout).
pub const PG_QUERY_CANCELED: &str = "57014";

/// Map a PostgreSQL error code to an error kind.
///
/// Codes outside the closed set fall back to `Database`, never silently
/// swallowed.
pub fn classify_code(code: &str) -> ErrorKind {
    match code {
        PG_UNIQUE_VIOLATION => ErrorKind::UniqueViolation,
        PG_FOREIGN_KEY_VIOLATION => ErrorKind::ForeignKeyViolation,
        PG_NOT_NULL_VIOLATION => ErrorKind::NullViolation,
        PG_STRING_DATA_RIGHT_TRUNCATION => ErrorKind::DataTooLong,
        PG_SYNTAX_ERROR => ErrorKind::SyntaxError,
        PG_QUERY_CANCELED => ErrorKind::Canceled,
        _ => ErrorKind::Database,
    }
}

/// Classify an arbitrary sqlx failure into an [`AppError`].
///
/// `context` names the failed operation and is prefixed onto the message.
pub fn classify_sqlx(context: &str, err: sqlx::Error) -> AppError {
    let (kind, detail) = match &err {
        sqlx::Error::RowNotFound => (ErrorKind::NotFound, "no matching row".to_string()),
        sqlx::Error::Database(db_err) => {
            let kind = db_err
                .code()
                .map_or(ErrorKind::Database, |code| classify_code(&code));
            (kind, db_err.message().to_string())
        }
        sqlx::Error::PoolTimedOut => (
            ErrorKind::DeadlineExceeded,
            "timed out acquiring a connection".to_string(),
        ),
        sqlx::Error::PoolClosed | sqlx::Error::WorkerCrashed => (
            ErrorKind::Canceled,
            "connection pool shut down".to_string(),
        ),
        other => (ErrorKind::Database, other.to_string()),
    };

    AppError::with_source(kind, format!("{context}: {detail}"), err)
}

/// Build the error reported when an operation deadline elapses mid-query.
pub fn deadline_exceeded(context: &str) -> AppError {
    AppError::new(
        ErrorKind::DeadlineExceeded,
        format!("{context}: operation deadline exceeded"),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_code_closed_mapping() {
        assert_eq!(classify_code("23505"), ErrorKind::UniqueViolation);
        assert_eq!(classify_code("23503"), ErrorKind::ForeignKeyViolation);
        assert_eq!(classify_code("23502"), ErrorKind::NullViolation);
        assert_eq!(classify_code("22001"), ErrorKind::DataTooLong);
        assert_eq!(classify_code("42601"), ErrorKind::SyntaxError);
        assert_eq!(classify_code("57014"), ErrorKind::Canceled);
    }

    #[test]
    fn test_unknown_code_is_database_not_swallowed() {
        assert_eq!(classify_code("40001"), ErrorKind::Database);
        assert_eq!(classify_code(""), ErrorKind::Database);
    }

    #[test]
    fn test_row_not_found_classified() {
        let err = classify_sqlx("find user", sqlx::Error::RowNotFound);
        assert_eq!(err.kind, ErrorKind::NotFound);
        assert!(err.message.starts_with("find user"));
    }

    #[test]
    fn test_pool_timeout_is_deadline() {
        let err = classify_sqlx("count users", sqlx::Error::PoolTimedOut);
        assert_eq!(err.kind, ErrorKind::DeadlineExceeded);
    }

    #[test]
    fn test_pool_closed_is_canceled() {
        let err = classify_sqlx("fetch users", sqlx::Error::PoolClosed);
        assert_eq!(err.kind, ErrorKind::Canceled);
    }

    #[test]
    fn test_deadline_error_names_operation() {
        let err = deadline_exceeded("fetch users");
        assert_eq!(err.kind, ErrorKind::DeadlineExceeded);
        assert!(err.message.contains("fetch users"));
    }
}
