//! Registry service tests against the in-memory document store

use std::collections::HashSet;
use std::sync::Arc;

use chrono::NaiveDate;

use core_kernel::{InMemoryDocumentStore, PersonId, Repository};
use domain_person::{Address, Gender, NewPerson, Person, PersonEdit, PersonError, PersonService};

fn new_person(username: &str) -> NewPerson {
    NewPerson {
        first_name: "Elif".to_string(),
        last_name: "Sahin".to_string(),
        email: format!("{}@example.com", username),
        phone: "+90 555 010 2030".to_string(),
        gender: Gender::Female,
        username: username.to_string(),
        password: "p@ssw0rd".to_string(),
        date_of_birth: NaiveDate::from_ymd_opt(1991, 3, 9),
        location: Address::new("Gazi Blv. 7", "Izmir", "35230", "TR"),
    }
}

fn edit() -> PersonEdit {
    PersonEdit {
        first_name: "Elif".to_string(),
        last_name: "Aydin".to_string(),
        email: "elif.aydin@example.com".to_string(),
        phone: "0232 111 2233".to_string(),
        gender: Gender::Female,
        location: Address::new("Kibris Sehitleri Cd. 3", "Izmir", "35220", "TR"),
    }
}

fn service() -> (Arc<InMemoryDocumentStore>, PersonService) {
    let store = Arc::new(InMemoryDocumentStore::new());
    let service = PersonService::new(store.clone());
    (store, service)
}

mod crud {
    use super::*;

    #[tokio::test]
    async fn test_register_then_get_returns_same_record() {
        let (_, service) = service();
        let created = service.register(new_person("elif")).await.unwrap();

        let fetched = service.get(created.id.as_str()).await.unwrap();
        assert_eq!(fetched, Some(created));
    }

    #[tokio::test]
    async fn test_register_stores_in_persons_container() {
        let (store, service) = service();
        service.register(new_person("elif")).await.unwrap();

        assert_eq!(store.len(Person::CONTAINER).await, 1);
    }

    #[tokio::test]
    async fn test_invalid_registration_is_not_stored() {
        let (store, service) = service();
        let mut details = new_person("elif");
        details.email = "nope".to_string();
        details.first_name.clear();

        let err = service.register(details).await.unwrap_err();
        assert!(matches!(err, PersonError::ValidationFailed(_)));
        assert!(store.is_empty(Person::CONTAINER).await);
    }

    #[tokio::test]
    async fn test_edit_changes_only_touched_fields() {
        let (_, service) = service();
        let created = service.register(new_person("elif")).await.unwrap();

        let updated = service.edit(created.id.as_str(), edit()).await.unwrap();

        assert_eq!(updated.name.last, "Aydin");
        assert_eq!(updated.email.data, "elif.aydin@example.com");
        assert!(!updated.email.verified);
        assert!(!updated.phone.verified);
        assert_eq!(updated.location.address, "Kibris Sehitleri Cd. 3");
        assert!(updated.last_updated >= created.last_updated);

        assert_eq!(updated.login, created.login);
        assert_eq!(updated.registered, created.registered);
        assert_eq!(updated.date_of_birth, created.date_of_birth);
        assert_eq!(updated.localization, created.localization);
        assert_eq!(updated.picture, created.picture);

        let stored = service.get(created.id.as_str()).await.unwrap().unwrap();
        assert_eq!(stored, updated);
    }

    #[tokio::test]
    async fn test_edit_missing_person_is_not_found() {
        let (_, service) = service();
        let err = service.edit("missing", edit()).await.unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_remove_then_get_is_none() {
        let (_, service) = service();
        let created = service.register(new_person("elif")).await.unwrap();

        service.remove(created.id.as_str()).await.unwrap();

        assert_eq!(service.get(created.id.as_str()).await.unwrap(), None);
        assert!(service.remove(created.id.as_str()).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_none() {
        let (_, service) = service();
        assert_eq!(service.get(PersonId::new().as_str()).await.unwrap(), None);
        assert_eq!(service.get("").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_store_outage_propagates() {
        let (store, service) = service();
        store.set_unavailable(true);

        let err = service.list().await.unwrap_err();
        assert!(matches!(err, PersonError::Store(_)));
        assert!(!err.is_not_found());
    }
}

mod listing {
    use super::*;

    #[tokio::test]
    async fn test_list_returns_every_person_once_across_pages() {
        let store = Arc::new(InMemoryDocumentStore::new());
        let repository = Repository::<Person>::new(store.clone(), Person::CONTAINER).with_page_size(3);
        let service = PersonService::with_repository(repository.clone());

        let template = service.register(new_person("seed")).await.unwrap();
        let mut expected: HashSet<String> = HashSet::from([template.id.to_string()]);
        for _ in 0..9 {
            let mut copy = template.clone();
            copy.id = PersonId::new();
            repository.create(&copy).await.unwrap();
            expected.insert(copy.id.to_string());
        }

        let listed = service.list().await.unwrap();
        let ids: HashSet<String> = listed.iter().map(|p| p.id.to_string()).collect();

        assert_eq!(listed.len(), 10);
        assert_eq!(ids, expected);
    }

    #[tokio::test]
    async fn test_list_empty_registry() {
        let (_, service) = service();
        assert!(service.list().await.unwrap().is_empty());
    }
}

mod lookup {
    use super::*;

    #[tokio::test]
    async fn test_find_by_username() {
        let (_, service) = service();
        let elif = service.register(new_person("elif")).await.unwrap();
        service.register(new_person("deniz")).await.unwrap();

        let found = service.find_by_username("elif").await.unwrap();
        assert_eq!(found.map(|p| p.id), Some(elif.id));
        assert!(service.find_by_username("nobody").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_register_rejects_taken_username() {
        let (store, service) = service();
        let elif = service.register(new_person("elif")).await.unwrap();

        let mut again = new_person("elif");
        again.first_name = "Another".to_string();
        let err = service.register(again).await.unwrap_err();

        assert!(matches!(err, PersonError::UsernameTaken(ref name) if name == "elif"));
        assert!(err.is_conflict());
        assert_eq!(store.len(Person::CONTAINER).await, 1);
        assert_eq!(service.find_by_username("elif").await.unwrap().map(|p| p.id), Some(elif.id));
    }
}
