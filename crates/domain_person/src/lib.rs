//! Person Registry Domain
//!
//! This crate holds the member records of the registry and the use cases
//! around them.
//!
//! - `person`: the `Person` document, registration and edit rules
//! - `credentials`: Argon2-hashed logins
//! - `validation`: `PersonValidator`
//! - `service`: `PersonService`, the registry operations over `Repository<Person>`
//!
//! # Examples
//!
//! ```rust
//! use chrono::Utc;
//! use domain_person::{Address, Gender, NewPerson, Person};
//!
//! let person = Person::register(
//!     NewPerson {
//!         first_name: "Zeynep".to_string(),
//!         last_name: "Arslan".to_string(),
//!         email: "zeynep@example.com".to_string(),
//!         phone: "+90 555 123 4567".to_string(),
//!         gender: Gender::Female,
//!         username: "zeynep".to_string(),
//!         password: "correct horse".to_string(),
//!         date_of_birth: None,
//!         location: Address::new("Cumhuriyet Blv. 5", "Izmir", "35210", "TR"),
//!     },
//!     Utc::now(),
//! )
//! .unwrap();
//!
//! assert_eq!(person.localization, "tr-TR");
//! assert!(person.login.verify_password("correct horse"));
//! ```

pub mod person;
pub mod address;
pub mod contact;
pub mod credentials;
pub mod error;
pub mod validation;
pub mod service;

pub use person::{
    Person, Name, Gender, ProfilePicture, NewPerson, PersonEdit,
    DEFAULT_LOCALIZATION, default_date_of_birth,
};
pub use address::Address;
pub use contact::VerifiedData;
pub use credentials::Login;
pub use error::PersonError;
pub use validation::{PersonValidator, ValidationResult};
pub use service::PersonService;
