// Unit tests for usrform-manager
// These exercise the public API of the store, model and error helpers

#[cfg(test)]
mod store_tests {
    use usrform_manager::storage::{KeyValueStore, MemoryStore};
    use usrform_manager::{STORAGE_KEY, Tag, UserRecord, UserType, UsersStore};

    fn record(id: i64, login: &str) -> UserRecord {
        UserRecord {
            id,
            login: login.to_string(),
            password: format!("{login}-pw"),
            user_type: UserType::Local,
            tags: vec![Tag::new("team")],
        }
    }

    fn store_with(users: &[UserRecord]) -> UsersStore<MemoryStore> {
        let raw = serde_json::to_string(users).unwrap();
        UsersStore::initialize(MemoryStore::with_item(STORAGE_KEY, &raw)).unwrap()
    }

    #[test]
    fn test_initialize_without_data_gives_default_record() {
        let store = UsersStore::initialize(MemoryStore::new()).unwrap();
        assert_eq!(store.users().len(), 1);
        let u = &store.users()[0];
        assert_eq!(u.login, "");
        assert_eq!(u.password, "");
        assert_eq!(u.user_type, UserType::Ldap);
        assert!(u.tags.is_empty());
    }

    #[test]
    fn test_initialize_with_empty_array_stays_empty() {
        let store = UsersStore::initialize(MemoryStore::with_item(STORAGE_KEY, "[]")).unwrap();
        assert!(store.users().is_empty());
    }

    #[test]
    fn test_initialize_with_null_uses_placeholder() {
        let store = UsersStore::initialize(MemoryStore::with_item(STORAGE_KEY, "null")).unwrap();
        assert_eq!(store.users().len(), 1);
        assert_eq!(store.users()[0], UserRecord::placeholder(store.users()[0].id));
    }

    #[test]
    fn test_initialize_keeps_stored_order() {
        let store = store_with(&[record(3, "c"), record(1, "a"), record(2, "b")]);
        let logins: Vec<_> = store.users().iter().map(|u| u.login.as_str()).collect();
        assert_eq!(logins, vec!["c", "a", "b"]);
    }

    #[test]
    fn test_initialize_with_wrong_shape_falls_back() {
        // valid JSON, wrong shape
        let store =
            UsersStore::initialize(MemoryStore::with_item(STORAGE_KEY, r#"{"id": 1}"#)).unwrap();
        assert_eq!(store.users().len(), 1);
        assert_eq!(store.users()[0].login, "");
    }

    #[test]
    fn test_add_grows_by_one_with_newer_id() {
        let mut store = store_with(&[record(10, "a"), record(20, "b")]);
        let before = store.users().len();
        let id = store.add_user().unwrap();
        assert_eq!(store.users().len(), before + 1);
        assert!(store.users()[..before].iter().all(|u| u.id < id));
        let added = store.get(id).unwrap();
        assert_eq!(added, &UserRecord::placeholder(id));
    }

    #[test]
    fn test_many_rapid_adds_never_collide() {
        let mut store = store_with(&[]);
        let ids: Vec<i64> = (0..50).map(|_| store.add_user().unwrap()).collect();
        let mut sorted = ids.clone();
        sorted.dedup();
        assert_eq!(sorted.len(), ids.len());
        assert!(ids.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_update_changes_every_field_of_match() {
        let mut store = store_with(&[record(1, "a"), record(2, "b")]);
        let new = UserRecord {
            id: 1,
            login: "alpha".into(),
            password: String::new(),
            user_type: UserType::Ldap,
            tags: vec![],
        };
        store.update_user(&new).unwrap();
        assert_eq!(store.get(1), Some(&new));
        assert_eq!(store.get(2), Some(&record(2, "b")));
    }

    #[test]
    fn test_each_mutation_writes_full_list() {
        let mut store = store_with(&[record(1, "a")]);
        store.add_user().unwrap();
        store.update_user(&record(1, "z")).unwrap();
        store.delete_user(999).unwrap();
        assert_eq!(store.storage().writes, 3);

        let raw = store.storage().get_item(STORAGE_KEY).unwrap().unwrap();
        let persisted: Vec<UserRecord> = serde_json::from_str(&raw).unwrap();
        assert_eq!(persisted, store.users());
    }

    #[test]
    fn test_persisted_json_uses_camel_case_field_names() {
        let mut store = store_with(&[]);
        store.update_user(&record(1, "none")).unwrap();
        store.add_user().unwrap();
        let raw = store.storage().get_item(STORAGE_KEY).unwrap().unwrap();
        let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
        let first = &value.as_array().unwrap()[0];
        for key in ["id", "login", "password", "userType", "tag"] {
            assert!(first.get(key).is_some(), "missing {key}");
        }
        assert_eq!(first["userType"], "LDAP");
    }
}

#[cfg(test)]
mod model_tests {
    use usrform_manager::model::{IdGenerator, format_tags, parse_tags};
    use usrform_manager::{Tag, UserType};

    #[test]
    fn test_user_type_labels_and_keys() {
        assert_eq!(UserType::Ldap.key(), "LDAP");
        assert_eq!(UserType::Local.key(), "local");
        assert_eq!(UserType::Local.label(), "Local");
        assert_eq!(UserType::Ldap.toggled(), UserType::Local);
        assert_eq!(UserType::ALL.len(), 2);
    }

    #[test]
    fn test_tags_keep_order() {
        let tags = parse_tags("z; a; m");
        assert_eq!(tags, vec![Tag::new("z"), Tag::new("a"), Tag::new("m")]);
        assert_eq!(format_tags(&tags), "z; a; m");
    }

    #[test]
    fn test_id_generator_follows_clock() {
        let mut ids = IdGenerator::default();
        let a = ids.next_id();
        let b = ids.next_id();
        assert!(b > a);
        assert!(a > 1_600_000_000_000, "ids are millisecond timestamps");
    }
}

#[cfg(test)]
mod error_handling_tests {
    use std::error::Error;
    use usrform_manager::error::{Context, DynError, StorageError};

    #[test]
    fn test_context_error_chaining() {
        let base_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let result: Result<(), std::io::Error> = Err(base_error);

        let err = result
            .with_ctx(|| "Failed to read storage file".to_string())
            .unwrap_err();
        let err_string = err.to_string();
        assert!(err_string.contains("Failed to read storage file"));
        assert!(err_string.contains("file not found"));
        assert!(err.source().is_some());
    }

    #[test]
    fn test_refused_write_error() {
        let err: DynError = StorageError::WriteRefused { key: "awesomeUsers".into() }.into();
        assert!(err.to_string().contains("awesomeUsers"));
        assert_eq!(
            err.downcast_ref::<StorageError>(),
            Some(&StorageError::WriteRefused { key: "awesomeUsers".into() })
        );
    }
}
