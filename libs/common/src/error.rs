//! Custom error types for the common library
//!
//! Storage failures are classified once, here, from the typed SQLSTATE
//! information sqlx exposes. Callers match on the variant and never on the
//! message text.

use sqlx::Error as SqlxError;
use thiserror::Error;

/// Custom error type for database operations
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Error occurred during database connection
    #[error("Database connection error: {0}")]
    Connection(#[source] SqlxError),

    /// Error occurred during database query execution
    #[error("Database query error: {0}")]
    Query(#[source] SqlxError),

    /// Error occurred during database migration
    #[error("Database migration error: {0}")]
    Migration(String),

    /// Configuration error
    #[error("Database configuration error: {0}")]
    Configuration(String),

    /// A UNIQUE constraint rejected the write
    #[error("Unique constraint violated: {0}")]
    UniqueViolation(String),

    /// A FOREIGN KEY constraint rejected the write
    #[error("Foreign key constraint violated: {0}")]
    ForeignKeyViolation(String),

    /// A CHECK constraint rejected the write
    #[error("Check constraint violated: {0}")]
    CheckViolation(String),

    /// A single-row lookup matched nothing
    #[error("Row not found")]
    RowNotFound,

    /// A write that must touch a row touched none
    #[error("No rows affected by {0}")]
    NoRowsAffected(&'static str),
}

impl DatabaseError {
    /// True for the constraint variants that signal a duplicate row
    pub fn is_unique_violation(&self) -> bool {
        matches!(self, DatabaseError::UniqueViolation(_))
    }

    /// True for a rejected reference to a missing parent row
    pub fn is_foreign_key_violation(&self) -> bool {
        matches!(self, DatabaseError::ForeignKeyViolation(_))
    }
}

impl From<SqlxError> for DatabaseError {
    fn from(err: SqlxError) -> Self {
        match err {
            SqlxError::RowNotFound => DatabaseError::RowNotFound,
            SqlxError::Database(ref db_err) => {
                let constraint = db_err.constraint().unwrap_or_default().to_string();
                if db_err.is_unique_violation() {
                    DatabaseError::UniqueViolation(constraint)
                } else if db_err.is_foreign_key_violation() {
                    DatabaseError::ForeignKeyViolation(constraint)
                } else if db_err.is_check_violation() {
                    DatabaseError::CheckViolation(constraint)
                } else {
                    DatabaseError::Query(err)
                }
            }
            SqlxError::PoolTimedOut | SqlxError::PoolClosed | SqlxError::Io(_) | SqlxError::Tls(_) => {
                DatabaseError::Connection(err)
            }
            other => DatabaseError::Query(other),
        }
    }
}

/// Type alias for Result with DatabaseError
pub type DatabaseResult<T> = Result<T, DatabaseError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn row_not_found_is_classified() {
        let err = DatabaseError::from(SqlxError::RowNotFound);
        assert!(matches!(err, DatabaseError::RowNotFound));
    }

    #[test]
    fn pool_timeout_is_a_connection_error() {
        let err = DatabaseError::from(SqlxError::PoolTimedOut);
        assert!(matches!(err, DatabaseError::Connection(_)));
        assert!(!err.is_unique_violation());
    }

    #[test]
    fn protocol_error_is_a_query_error() {
        let err = DatabaseError::from(SqlxError::Protocol("unexpected message".to_string()));
        assert!(matches!(err, DatabaseError::Query(_)));
    }
}
