//! Property tests for the person document

use chrono::{Duration, Utc};
use once_cell::sync::Lazy;
use proptest::prelude::*;

use domain_person::{Address, Gender, NewPerson, Person, PersonEdit};

fn gender_strategy() -> impl Strategy<Value = Gender> {
    prop_oneof![
        Just(Gender::Male),
        Just(Gender::Female),
        Just(Gender::Other),
        Just(Gender::Unspecified),
    ]
}

fn edit_strategy() -> impl Strategy<Value = PersonEdit> {
    (
        "[A-Za-z]{1,12}",
        "[A-Za-z]{1,12}",
        "[a-z]{1,8}@[a-z]{1,8}\\.com",
        "[0-9 ]{3,15}",
        gender_strategy(),
        ("[A-Za-z0-9 ]{0,20}", "[A-Za-z]{0,12}", "[0-9]{0,5}", "[A-Z]{0,2}"),
    )
        .prop_map(|(first, last, email, phone, gender, (street, city, post, country))| PersonEdit {
            first_name: first,
            last_name: last,
            email,
            phone,
            gender,
            location: Address::new(street, city, post, country),
        })
}

static REGISTERED: Lazy<Person> = Lazy::new(|| {
    Person::register(
        NewPerson {
            first_name: "Can".to_string(),
            last_name: "Ozturk".to_string(),
            email: "can@example.com".to_string(),
            phone: "5550001111".to_string(),
            gender: Gender::Male,
            username: "can".to_string(),
            password: "secret".to_string(),
            date_of_birth: None,
            location: Address::new("Konak", "Izmir", "35250", "TR"),
        },
        Utc::now(),
    )
    .unwrap()
});

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn edit_preserves_untouched_fields(edit in edit_strategy(), minutes in 0i64..10_000) {
        let original = REGISTERED.clone();
        let mut edited = original.clone();
        let at = original.registered + Duration::minutes(minutes);

        edited.apply_edit(edit.clone(), at);

        prop_assert_eq!(&edited.id, &original.id);
        prop_assert_eq!(&edited.login, &original.login);
        prop_assert_eq!(edited.active, original.active);
        prop_assert_eq!(&edited.picture, &original.picture);
        prop_assert_eq!(edited.date_of_birth, original.date_of_birth);
        prop_assert_eq!(&edited.localization, &original.localization);
        prop_assert_eq!(edited.registered, original.registered);

        prop_assert_eq!(&edited.name.first, &edit.first_name);
        prop_assert_eq!(&edited.name.last, &edit.last_name);
        prop_assert_eq!(&edited.email.data, &edit.email);
        prop_assert!(!edited.email.verified && !edited.phone.verified);
        prop_assert_eq!(edited.gender, edit.gender);
        prop_assert_eq!(&edited.location, &edit.location);
        prop_assert_eq!(edited.last_updated, at);
    }
}
