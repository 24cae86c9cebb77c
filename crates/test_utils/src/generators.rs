//! Property-Based Test Generators
//!
//! Provides proptest strategies for generating registration details, edits
//! and page sizes that satisfy the person validation rules.

use chrono::NaiveDate;
use proptest::prelude::*;

use domain_person::{Address, Gender, NewPerson, PersonEdit};

/// Strategy for generating Gender values
pub fn gender_strategy() -> impl Strategy<Value = Gender> {
    prop_oneof![
        Just(Gender::Male),
        Just(Gender::Female),
        Just(Gender::Other),
        Just(Gender::Unspecified),
    ]
}

/// Strategy for generating non-blank personal names
pub fn name_strategy() -> impl Strategy<Value = String> {
    "[A-Z][a-z]{1,11}"
}

/// Strategy for generating syntactically valid email addresses
pub fn email_strategy() -> impl Strategy<Value = String> {
    ("[a-z]{1,10}", "[a-z]{2,10}", prop_oneof![Just("com"), Just("org"), Just("net")])
        .prop_map(|(user, domain, tld)| format!("{}@{}.{}", user, domain, tld))
}

/// Strategy for generating phone numbers made of digits, spaces and a leading plus
pub fn phone_strategy() -> impl Strategy<Value = String> {
    ("[0-9]{3}", "[0-9]{3}", "[0-9]{4}", any::<bool>()).prop_map(|(a, b, c, intl)| {
        if intl {
            format!("+90 {} {} {}", a, b, c)
        } else {
            format!("{}{}{}", a, b, c)
        }
    })
}

/// Strategy for generating addresses
pub fn address_strategy() -> impl Strategy<Value = Address> {
    (
        "[A-Za-z ]{3,20}[0-9]{1,3}",
        prop_oneof![Just("Izmir"), Just("Ankara"), Just("Istanbul"), Just("Bursa")],
        "[0-9]{5}",
        prop_oneof![Just("TR"), Just("DE"), Just("NL")],
    )
        .prop_map(|(street, city, post_code, country)| {
            Address::new(street, city, post_code, country)
        })
}

/// Strategy for generating past birth dates (1930 to 2005)
pub fn date_of_birth_strategy() -> impl Strategy<Value = NaiveDate> {
    (1930i32..2005, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default())
}

/// Strategy for generating valid registration details
pub fn new_person_strategy() -> impl Strategy<Value = NewPerson> {
    (
        (name_strategy(), name_strategy()),
        email_strategy(),
        phone_strategy(),
        gender_strategy(),
        "[a-z]{3,12}",
        prop::option::of(date_of_birth_strategy()),
        address_strategy(),
    )
        .prop_map(
            |((first_name, last_name), email, phone, gender, username, date_of_birth, location)| {
                NewPerson {
                    first_name,
                    last_name,
                    email,
                    phone,
                    gender,
                    username,
                    password: "generated-password".to_string(),
                    date_of_birth,
                    location,
                }
            },
        )
}

/// Strategy for generating valid edits
pub fn person_edit_strategy() -> impl Strategy<Value = PersonEdit> {
    (
        (name_strategy(), name_strategy()),
        email_strategy(),
        phone_strategy(),
        gender_strategy(),
        address_strategy(),
    )
        .prop_map(|((first_name, last_name), email, phone, gender, location)| PersonEdit {
            first_name,
            last_name,
            email,
            phone,
            gender,
            location,
        })
}

/// Strategy for generating query page sizes
pub fn page_size_strategy() -> impl Strategy<Value = u32> {
    1u32..12
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_person::PersonValidator;

    proptest! {
        #[test]
        fn generated_contact_details_validate(email in email_strategy(), phone in phone_strategy()) {
            let result = PersonValidator::validate_contact(&email, &phone);
            prop_assert!(result.is_valid, "{:?}", result.errors);
        }

        #[test]
        fn generated_birth_dates_are_in_the_past(date in date_of_birth_strategy()) {
            prop_assert!(date < chrono::Utc::now().date_naive());
        }
    }
}
