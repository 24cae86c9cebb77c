//! Login credentials
//!
//! Passwords are stored as Argon2 PHC strings with a random salt; the plain
//! text never reaches the document.

use argon2::{
    password_hash::{rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString},
    Argon2,
};
use serde::{Deserialize, Serialize};

use core_kernel::UserKey;

use crate::error::PersonError;

/// Username, password hash and session key of a member
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Login {
    pub username: String,
    /// Argon2 PHC hash of the password
    pub password: String,
    pub user_key: UserKey,
}

impl Login {
    /// Creates a login, hashing `password` and generating a fresh user key
    ///
    /// # Errors
    ///
    /// Returns `PersonError::Credential` if hashing fails
    pub fn create(username: impl Into<String>, password: &str) -> Result<Self, PersonError> {
        Ok(Self {
            username: username.into(),
            password: hash_password(password)?,
            user_key: UserKey::generate(),
        })
    }

    /// Checks a candidate password against the stored hash
    ///
    /// A hash that cannot be parsed never verifies.
    pub fn verify_password(&self, candidate: &str) -> bool {
        let Ok(parsed) = PasswordHash::new(&self.password) else {
            return false;
        };
        Argon2::default()
            .verify_password(candidate.as_bytes(), &parsed)
            .is_ok()
    }
}

/// Hashes a password into an Argon2 PHC string
pub fn hash_password(password: &str) -> Result<String, PersonError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| PersonError::Credential(format!("Failed to hash password: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_password_is_hashed_and_verifies() {
        let login = Login::create("jdoe", "s3cret").unwrap();

        assert_ne!(login.password, "s3cret");
        assert!(login.password.starts_with("$argon2"));
        assert!(login.verify_password("s3cret"));
        assert!(!login.verify_password("wrong"));
    }

    #[test]
    fn test_same_password_gets_distinct_salts() {
        let a = hash_password("same").unwrap();
        let b = hash_password("same").unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn test_garbage_hash_never_verifies() {
        let mut login = Login::create("jdoe", "pw").unwrap();
        login.password = "5f4dcc3b5aa765d61d8327deb882cf99".to_string();
        assert!(!login.verify_password("password"));
    }

    #[test]
    fn test_user_key_serializes_camel_case() {
        let login = Login::create("jdoe", "pw").unwrap();
        let json = serde_json::to_value(&login).unwrap();
        assert_eq!(json["userKey"].as_str().map(str::len), Some(32));
    }
}
