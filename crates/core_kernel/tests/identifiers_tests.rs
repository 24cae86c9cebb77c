//! Tests for document identifiers

use core_kernel::{PersonId, UserKey};
use std::collections::HashSet;
use uuid::Uuid;

mod person_id_tests {
    use super::*;

    #[test]
    fn test_new_generates_unique_ids() {
        let ids: HashSet<_> = (0..100).map(|_| PersonId::new()).collect();
        assert_eq!(ids.len(), 100);
    }

    #[test]
    fn test_from_uuid_round_trips_through_display() {
        let uuid = Uuid::new_v4();
        let id = PersonId::from_uuid(uuid);
        assert_eq!(id.to_string(), uuid.to_string());
    }

    #[test]
    fn test_accepts_non_uuid_ids() {
        let id: PersonId = "legacy-record-7".parse().unwrap();
        assert_eq!(id.as_str(), "legacy-record-7");
    }

    #[test]
    fn test_serializes_as_bare_string() {
        let id: PersonId = "abc".parse().unwrap();
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"abc\"");

        let back: PersonId = serde_json::from_str("\"abc\"").unwrap();
        assert_eq!(back, id);
    }
}

mod user_key_tests {
    use super::*;

    #[test]
    fn test_keys_are_unique() {
        assert_ne!(UserKey::generate(), UserKey::generate());
    }

    #[test]
    fn test_key_has_no_dashes() {
        assert!(!UserKey::generate().to_string().contains('-'));
    }
}
