//! Test Data Builders
//!
//! Builder for registration details: tests set only the fields they care
//! about and take fixture defaults for everything else.

use chrono::{NaiveDate, Utc};

use domain_person::{Address, Gender, NewPerson, Person};

use crate::fixtures::PersonFixtures;

/// Builder for `NewPerson` registration details
#[derive(Debug, Clone)]
pub struct NewPersonBuilder {
    details: NewPerson,
}

impl Default for NewPersonBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl NewPersonBuilder {
    /// Starts from the `PersonFixtures::ayse` registration
    pub fn new() -> Self {
        Self {
            details: PersonFixtures::ayse(),
        }
    }

    pub fn with_name(mut self, first: impl Into<String>, last: impl Into<String>) -> Self {
        self.details.first_name = first.into();
        self.details.last_name = last.into();
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.details.email = email.into();
        self
    }

    pub fn with_phone(mut self, phone: impl Into<String>) -> Self {
        self.details.phone = phone.into();
        self
    }

    pub fn with_gender(mut self, gender: Gender) -> Self {
        self.details.gender = gender;
        self
    }

    pub fn with_username(mut self, username: impl Into<String>) -> Self {
        self.details.username = username.into();
        self
    }

    pub fn with_password(mut self, password: impl Into<String>) -> Self {
        self.details.password = password.into();
        self
    }

    pub fn with_date_of_birth(mut self, date: NaiveDate) -> Self {
        self.details.date_of_birth = Some(date);
        self
    }

    pub fn with_location(mut self, location: Address) -> Self {
        self.details.location = location;
        self
    }

    /// Returns the registration details
    pub fn build(self) -> NewPerson {
        self.details
    }

    /// Registers the details at the current time
    ///
    /// # Panics
    ///
    /// Panics if the password cannot be hashed
    pub fn register(self) -> Person {
        Person::register(self.details, Utc::now()).expect("builder registration")
    }
}
