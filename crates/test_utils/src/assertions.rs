//! Custom Test Assertions
//!
//! Assertion helpers for person records with messages that name the field
//! that differs.

use std::collections::HashSet;

use domain_person::{Person, PersonEdit};

/// Asserts that `after` is `before` with exactly `edit` applied
///
/// # Panics
///
/// Panics naming the first field that does not match
pub fn assert_edit_applied(before: &Person, after: &Person, edit: &PersonEdit) {
    assert_eq!(after.id, before.id, "id changed");
    assert_eq!(after.login, before.login, "login changed");
    assert_eq!(after.active, before.active, "active flag changed");
    assert_eq!(after.picture, before.picture, "picture changed");
    assert_eq!(after.date_of_birth, before.date_of_birth, "date of birth changed");
    assert_eq!(after.localization, before.localization, "localization changed");
    assert_eq!(after.registered, before.registered, "registration time changed");

    assert_eq!(after.name.first, edit.first_name, "first name not applied");
    assert_eq!(after.name.last, edit.last_name, "last name not applied");
    assert_eq!(after.email.data, edit.email, "email not applied");
    assert_eq!(after.phone.data, edit.phone, "phone not applied");
    assert!(
        !after.email.verified && !after.phone.verified,
        "edited contact details must be unverified"
    );
    assert_eq!(after.gender, edit.gender, "gender not applied");
    assert_eq!(after.location, edit.location, "address not applied");
    assert!(
        after.last_updated >= before.last_updated,
        "last updated moved backwards: {} < {}",
        after.last_updated,
        before.last_updated
    );
}

/// Asserts that `listed` holds each of `expected_ids` exactly once and nothing else
pub fn assert_listed_once<'a>(listed: &[Person], expected_ids: impl IntoIterator<Item = &'a str>) {
    let mut seen = HashSet::new();
    for person in listed {
        assert!(
            seen.insert(person.id.as_str()),
            "person {} listed more than once",
            person.id
        );
    }

    let expected: HashSet<&str> = expected_ids.into_iter().collect();
    assert_eq!(
        seen, expected,
        "listed ids differ: got {} records, expected {}",
        seen.len(),
        expected.len()
    );
}

/// Asserts that a serialized person does not leak its password hash
pub fn assert_no_password(json: &serde_json::Value) {
    let rendered = json.to_string();
    assert!(
        !rendered.contains("$argon2"),
        "password hash present in {}",
        rendered
    );
}
