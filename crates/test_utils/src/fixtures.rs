//! Pre-built Test Fixtures
//!
//! Consistent, predictable person data for unit and HTTP tests.

use chrono::{NaiveDate, Utc};
use fake::faker::internet::en::{SafeEmail, Username};
use fake::faker::name::en::{FirstName, LastName};
use fake::Fake;

use domain_person::{Address, Gender, NewPerson, Person, PersonEdit};

/// Fixture for addresses
pub struct AddressFixtures;

impl AddressFixtures {
    pub fn izmir() -> Address {
        Address::new("Ataturk Cd. No:12", "Izmir", "35210", "TR")
    }

    pub fn ankara() -> Address {
        Address::new("Kizilay Meydani 1", "Ankara", "06420", "TR")
    }
}

/// Fixture for registration and edit data
pub struct PersonFixtures;

impl PersonFixtures {
    /// Plain text password used by every fixture registration
    pub const PASSWORD: &'static str = "Sup3r-secret";

    /// A fully filled in registration for "Ayse Yilmaz"
    pub fn ayse() -> NewPerson {
        NewPerson {
            first_name: "Ayse".to_string(),
            last_name: "Yilmaz".to_string(),
            email: "ayse.yilmaz@example.com".to_string(),
            phone: "+90 532 000 1122".to_string(),
            gender: Gender::Female,
            username: "ayilmaz".to_string(),
            password: Self::PASSWORD.to_string(),
            date_of_birth: None,
            location: AddressFixtures::izmir(),
        }
    }

    /// A registration for "Mert Kaya" with an explicit birth date
    pub fn mert() -> NewPerson {
        NewPerson {
            first_name: "Mert".to_string(),
            last_name: "Kaya".to_string(),
            email: "mert.kaya@example.com".to_string(),
            phone: "0312 444 5566".to_string(),
            gender: Gender::Male,
            username: "mkaya".to_string(),
            password: Self::PASSWORD.to_string(),
            date_of_birth: NaiveDate::from_ymd_opt(1975, 11, 23),
            location: AddressFixtures::ankara(),
        }
    }

    /// A registration with randomized names and email
    pub fn random() -> NewPerson {
        let first: String = FirstName().fake();
        let last: String = LastName().fake();
        NewPerson {
            first_name: first,
            last_name: last,
            email: SafeEmail().fake(),
            phone: "+90 555 123 4567".to_string(),
            gender: Gender::Unspecified,
            username: Username().fake(),
            password: Self::PASSWORD.to_string(),
            date_of_birth: None,
            location: AddressFixtures::izmir(),
        }
    }

    /// Registered record for `ayse()`
    pub fn registered_ayse() -> Person {
        Self::registered(Self::ayse())
    }

    /// Registers details at the current time
    ///
    /// # Panics
    ///
    /// Panics if the password cannot be hashed
    pub fn registered(details: NewPerson) -> Person {
        Person::register(details, Utc::now()).expect("fixture registration")
    }

    /// An edit moving the member to Ankara
    pub fn move_to_ankara() -> PersonEdit {
        PersonEdit {
            first_name: "Ayse".to_string(),
            last_name: "Demir".to_string(),
            email: "ayse.demir@example.com".to_string(),
            phone: "+90 532 999 8877".to_string(),
            gender: Gender::Female,
            location: AddressFixtures::ankara(),
        }
    }
}
