//! Database error types
//!
//! `DatabaseError` classifies everything SQLx can surface into the handful
//! of cases the adapters care about. The `From<sqlx::Error>` impl does the
//! classification, so repositories propagate with `?` and still get typed
//! variants.

use thiserror::Error;

/// Errors that can occur during database operations
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// The server could not be reached or refused the connection
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// A statement failed for a reason other than the ones below
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// No row matched the requested entity
    #[error("{entity} with id '{id}' not found")]
    NotFound { entity: &'static str, id: String },

    /// A unique index rejected the write
    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    /// An insert or update referenced a missing row
    #[error("Foreign key violation: {0}")]
    ForeignKeyViolation(String),

    /// A check constraint rejected the write
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// No free connection arrived within the acquire timeout
    #[error("Connection pool exhausted")]
    PoolExhausted,
}

impl DatabaseError {
    /// Builds a `NotFound` for one entity and key
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        DatabaseError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// True when the error is a missing-row case
    pub fn is_not_found(&self) -> bool {
        matches!(self, DatabaseError::NotFound { .. })
    }

    /// True for unique, foreign key, and check violations
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            DatabaseError::DuplicateEntry(_)
                | DatabaseError::ForeignKeyViolation(_)
                | DatabaseError::ConstraintViolation(_)
        )
    }

    /// True when the database itself was unreachable
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            DatabaseError::ConnectionFailed(_) | DatabaseError::PoolExhausted
        )
    }
}

/// Maps SQLx errors onto typed variants by PostgreSQL error code
///
/// https://www.postgresql.org/docs/current/errcodes-appendix.html
impl From<sqlx::Error> for DatabaseError {
    fn from(error: sqlx::Error) -> Self {
        match &error {
            sqlx::Error::RowNotFound => DatabaseError::not_found("Record", "unknown"),
            sqlx::Error::PoolTimedOut => DatabaseError::PoolExhausted,
            sqlx::Error::Io(e) => DatabaseError::ConnectionFailed(e.to_string()),
            sqlx::Error::Database(db_err) => {
                let message = db_err.message().to_string();
                match db_err.code().as_deref() {
                    Some("23505") => DatabaseError::DuplicateEntry(message),
                    Some("23503") => DatabaseError::ForeignKeyViolation(message),
                    Some("23514") => DatabaseError::ConstraintViolation(message),
                    _ => DatabaseError::QueryFailed(message),
                }
            }
            _ => DatabaseError::QueryFailed(error.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_carries_entity_and_id() {
        let error = DatabaseError::not_found("Project", "PRJ-123");
        assert!(error.is_not_found());
        assert!(error.to_string().contains("Project"));
        assert!(error.to_string().contains("PRJ-123"));
    }

    #[test]
    fn test_error_category_probes() {
        assert!(DatabaseError::DuplicateEntry("number".into()).is_constraint_violation());
        assert!(DatabaseError::PoolExhausted.is_connection_error());
        assert!(!DatabaseError::QueryFailed("syntax".into()).is_constraint_violation());
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let error: DatabaseError = sqlx::Error::RowNotFound.into();
        assert!(error.is_not_found());
    }
}
