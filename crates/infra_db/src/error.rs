//! Database error types
//!
//! SQLx failures are classified by PostgreSQL error code and then folded
//! into the shared `PortError` at the document store boundary.

use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur during database operations
#[derive(Debug, Error)]
pub enum DatabaseError {
    /// Failed to establish a database connection
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// The connection settings could not be parsed
    #[error("Invalid database configuration: {0}")]
    InvalidConfig(String),

    /// Query execution failed
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Entity not found in database
    #[error("Entity not found: {0}")]
    NotFound(String),

    /// Unique constraint violation
    #[error("Duplicate entry: {0}")]
    DuplicateEntry(String),

    /// Check constraint violation
    #[error("Constraint violation: {0}")]
    ConstraintViolation(String),

    /// Schema bootstrap error
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Serialization/deserialization error
    #[error("Serialization error: {0}")]
    SerializationError(String),

    /// Pool exhaustion - no available connections
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Generic SQL error
    #[error("SQL error: {0}")]
    SqlError(#[from] sqlx::Error),
}

impl DatabaseError {
    /// Creates a not found error for a specific entity type and identifier
    ///
    /// # Example
    ///
    /// ```rust
    /// use infra_db::DatabaseError;
    ///
    /// let error = DatabaseError::not_found("Document", "42");
    /// assert!(error.to_string().contains("Document"));
    /// ```
    pub fn not_found(entity: &str, id: impl std::fmt::Display) -> Self {
        DatabaseError::NotFound(format!("{} with id '{}' not found", entity, id))
    }

    /// Checks if this error indicates a record was not found
    pub fn is_not_found(&self) -> bool {
        matches!(self, DatabaseError::NotFound(_))
    }

    /// Checks if this error is a constraint violation
    pub fn is_constraint_violation(&self) -> bool {
        matches!(
            self,
            DatabaseError::DuplicateEntry(_) | DatabaseError::ConstraintViolation(_)
        )
    }

    /// Checks if this error is a connection-related issue
    pub fn is_connection_error(&self) -> bool {
        matches!(
            self,
            DatabaseError::ConnectionFailed(_) | DatabaseError::PoolExhausted
        )
    }
}

/// Maps SQLx errors to specific variants by PostgreSQL error code
///
/// <https://www.postgresql.org/docs/current/errcodes-appendix.html>
impl From<&sqlx::Error> for DatabaseError {
    fn from(error: &sqlx::Error) -> Self {
        match error {
            sqlx::Error::RowNotFound => DatabaseError::NotFound("Record not found".to_string()),
            sqlx::Error::PoolTimedOut => DatabaseError::PoolExhausted,
            sqlx::Error::PoolClosed | sqlx::Error::Io(_) | sqlx::Error::Tls(_) => {
                DatabaseError::ConnectionFailed(error.to_string())
            }
            sqlx::Error::Configuration(e) => DatabaseError::InvalidConfig(e.to_string()),
            sqlx::Error::ColumnDecode { .. } | sqlx::Error::Decode(_) => {
                DatabaseError::SerializationError(error.to_string())
            }
            sqlx::Error::Database(db_err) => {
                let message = db_err.message().to_string();
                match db_err.code().as_deref() {
                    // unique_violation, duplicate_database
                    Some("23505") | Some("42P04") => DatabaseError::DuplicateEntry(message),
                    Some("23514") | Some("23502") => DatabaseError::ConstraintViolation(message),
                    // invalid_password, invalid_authorization_specification
                    Some("28P01") | Some("28000") => DatabaseError::ConnectionFailed(message),
                    _ => DatabaseError::QueryFailed(message),
                }
            }
            _ => DatabaseError::QueryFailed(error.to_string()),
        }
    }
}

impl From<DatabaseError> for PortError {
    fn from(error: DatabaseError) -> Self {
        match error {
            DatabaseError::NotFound(message) => PortError::NotFound {
                entity_type: "Record".to_string(),
                id: message,
            },
            DatabaseError::DuplicateEntry(message) => PortError::Conflict { message },
            DatabaseError::ConstraintViolation(message) => PortError::Validation {
                message,
                field: None,
            },
            DatabaseError::SerializationError(message) => PortError::Transformation { message },
            DatabaseError::PoolExhausted => PortError::ServiceUnavailable {
                service: "database connection pool".to_string(),
            },
            DatabaseError::ConnectionFailed(message) | DatabaseError::InvalidConfig(message) => {
                PortError::Connection {
                    message,
                    source: None,
                }
            }
            DatabaseError::SqlError(e) => PortError::from(DatabaseError::from(&e)),
            other => PortError::Internal {
                message: other.to_string(),
                source: Some(Box::new(other)),
            },
        }
    }
}

/// Classifies a SQLx error straight into a `PortError`
pub(crate) fn port_error(error: sqlx::Error) -> PortError {
    DatabaseError::from(&error).into()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_timeout_is_exhaustion() {
        let error = DatabaseError::from(&sqlx::Error::PoolTimedOut);
        assert!(matches!(error, DatabaseError::PoolExhausted));
        assert!(error.is_connection_error());

        let port: PortError = error.into();
        assert!(port.is_transient());
    }

    #[test]
    fn test_duplicate_maps_to_conflict() {
        let port: PortError = DatabaseError::DuplicateEntry("documents_pkey".into()).into();
        assert!(port.is_conflict());
    }

    #[test]
    fn test_row_not_found_maps_to_not_found() {
        let port = port_error(sqlx::Error::RowNotFound);
        assert!(port.is_not_found());
    }

    #[test]
    fn test_wrapped_sql_error_is_reclassified() {
        let port: PortError = DatabaseError::SqlError(sqlx::Error::PoolClosed).into();
        assert!(matches!(port, PortError::Connection { .. }));
    }

    #[test]
    fn test_query_failure_is_internal() {
        let port: PortError = DatabaseError::QueryFailed("syntax error".into()).into();
        assert!(matches!(port, PortError::Internal { .. }));
    }
}
