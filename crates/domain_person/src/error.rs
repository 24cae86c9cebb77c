//! Person domain errors
//!
//! Not-found is kept distinct from every other failure so the HTTP layer can
//! answer 404; store failures are carried unchanged.

use thiserror::Error;

use core_kernel::PortError;

/// Errors that can occur in the person domain
#[derive(Debug, Error)]
pub enum PersonError {
    /// Person with the given ID was not found
    #[error("Person not found: {0}")]
    PersonNotFound(String),

    /// Invalid person data provided
    #[error("Invalid person data: {0}")]
    InvalidData(String),

    /// Person validation failed
    #[error("Person validation failed: {}", .0.join("; "))]
    ValidationFailed(Vec<String>),

    /// Another member already registered the username
    #[error("Username '{0}' is already taken")]
    UsernameTaken(String),

    /// Password hashing or verification failed
    #[error("Credential error: {0}")]
    Credential(String),

    /// The document store reported a failure
    #[error(transparent)]
    Store(#[from] PortError),
}

impl PersonError {
    /// Creates a PersonNotFound error from any ID type
    pub fn not_found(id: impl std::fmt::Display) -> Self {
        PersonError::PersonNotFound(id.to_string())
    }

    /// Creates an InvalidData error with a message
    pub fn invalid(message: impl Into<String>) -> Self {
        PersonError::InvalidData(message.into())
    }

    /// Creates a ValidationFailed error from validation errors
    pub fn validation_failed(errors: Vec<String>) -> Self {
        PersonError::ValidationFailed(errors)
    }

    /// Returns true if the person (or its document) does not exist
    pub fn is_not_found(&self) -> bool {
        match self {
            PersonError::PersonNotFound(_) => true,
            PersonError::Store(e) => e.is_not_found(),
            _ => false,
        }
    }

    /// Returns true if the write collided with an existing member
    pub fn is_conflict(&self) -> bool {
        match self {
            PersonError::UsernameTaken(_) => true,
            PersonError::Store(e) => e.is_conflict(),
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_not_found_counts_as_not_found() {
        let error: PersonError = PortError::not_found("Document", "7").into();
        assert!(error.is_not_found());

        let error: PersonError = PortError::conflict("taken").into();
        assert!(!error.is_not_found());
    }

    #[test]
    fn test_taken_username_is_a_conflict() {
        let error = PersonError::UsernameTaken("elif".into());
        assert!(error.is_conflict());
        assert!(!error.is_not_found());
        assert_eq!(error.to_string(), "Username 'elif' is already taken");

        let error: PersonError = PortError::conflict("taken").into();
        assert!(error.is_conflict());
    }

    #[test]
    fn test_validation_failed_joins_messages() {
        let error = PersonError::validation_failed(vec!["a".into(), "b".into()]);
        assert_eq!(error.to_string(), "Person validation failed: a; b");
    }
}
