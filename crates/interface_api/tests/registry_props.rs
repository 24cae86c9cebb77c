//! Property tests for listing and editing members through the registry stack

use std::sync::Arc;

use once_cell::sync::Lazy;
use proptest::prelude::*;

use core_kernel::{InMemoryDocumentStore, PersonId, Repository};
use domain_person::{Person, PersonService, PersonValidator};
use test_utils::{
    assert_edit_applied, assert_listed_once, new_person_strategy, page_size_strategy,
    person_edit_strategy, PersonFixtures,
};

/// Registered once so cases do not pay for password hashing
static TEMPLATE: Lazy<Person> = Lazy::new(PersonFixtures::registered_ayse);

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .build()
        .expect("test runtime")
}

fn member(n: usize) -> Person {
    let mut person = TEMPLATE.clone();
    person.id = format!("member-{:03}", n).parse::<PersonId>().expect("member id");
    person
}

proptest! {
    #[test]
    fn prop_listing_returns_each_member_once(count in 0usize..30, page_size in page_size_strategy()) {
        let store = Arc::new(InMemoryDocumentStore::new());
        let repository = Repository::<Person>::new(store, Person::CONTAINER).with_page_size(page_size);
        let service = PersonService::with_repository(repository.clone());

        let members: Vec<Person> = (0..count).map(member).collect();
        let listed = runtime().block_on(async {
            for person in &members {
                repository.create(person).await.expect("create member");
            }
            service.list().await.expect("list members")
        });

        assert_listed_once(&listed, members.iter().map(|p| p.id.as_str()));
    }

    #[test]
    fn prop_edit_touches_only_edited_fields(edit in person_edit_strategy()) {
        let store = Arc::new(InMemoryDocumentStore::new());
        let service = PersonService::new(store);
        let before = member(1);

        let (after, stored) = runtime().block_on(async {
            service.repository().create(&before).await.expect("create member");
            let after = service.edit(before.id.as_str(), edit.clone()).await.expect("edit member");
            let stored = service.get(before.id.as_str()).await.expect("get member");
            (after, stored)
        });

        assert_edit_applied(&before, &after, &edit);
        prop_assert_eq!(stored, Some(after));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(8))]

    #[test]
    fn prop_generated_registrations_validate(details in new_person_strategy()) {
        let person = Person::register(details, chrono::Utc::now()).expect("register");
        let result = PersonValidator::validate(&person);
        prop_assert!(result.is_valid, "{:?}", result.errors);
    }
}
