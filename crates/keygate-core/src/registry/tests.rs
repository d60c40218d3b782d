    use super::*;
    use std::sync::Arc;

    #[test]
    fn test_set_and_authenticate() {
        let registry = CredentialRegistry::new();
        registry.set_local("key", "value");

        assert_eq!(registry.authenticate("key", "value"), Some("value".to_string()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_authenticate_wrong_value() {
        let registry = CredentialRegistry::new();
        registry.set_local("key", "value");

        assert!(registry.authenticate("key", "other").is_none());
        assert!(registry.authenticate("key", "Value").is_none());
        assert!(registry.authenticate("key", "value ").is_none());
    }

    #[test]
    fn test_authenticate_prefix_and_extension_rejected() {
        let registry = CredentialRegistry::new();
        registry.set_local("key", "s3cret-value");

        assert!(registry.authenticate("key", "s3cret").is_none());
        assert!(registry.authenticate("key", "s3cret-value-2").is_none());
        assert!(registry.authenticate("key", "s3cret-valuE").is_none());
        assert_eq!(
            registry.authenticate("key", "s3cret-value"),
            Some("s3cret-value".to_string())
        );
    }

    #[test]
    fn test_authenticate_unknown_key() {
        let registry = CredentialRegistry::new();
        assert!(registry.authenticate("missing", "value").is_none());
    }

    #[test]
    fn test_authenticate_empty_inputs() {
        let registry = CredentialRegistry::new();
        registry.set_local("", "value");
        registry.set_local("key", "value");

        // An entry stored under "" must still never authenticate
        assert!(registry.authenticate("", "value").is_none());
        assert!(registry.authenticate("key", "").is_none());
        assert!(registry.authenticate("", "").is_none());
    }

    #[test]
    fn test_set_local_rejects_empty_value() {
        let registry = CredentialRegistry::new();
        registry.set_local("key", "");
        assert!(registry.is_empty());

        registry.set_local("key", "value");
        registry.set_local("key", "");
        assert_eq!(registry.lookup("key"), Some("value".to_string()));
    }

    #[test]
    fn test_set_local_overwrites() {
        let registry = CredentialRegistry::new();
        registry.set_local("key", "old");
        registry.set_local("key", "new");

        assert!(registry.authenticate("key", "old").is_none());
        assert_eq!(registry.authenticate("key", "new"), Some("new".to_string()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_delete_local() {
        let registry = CredentialRegistry::new();
        registry.set_local("key", "value");
        registry.delete_local("key");

        assert!(registry.authenticate("key", "value").is_none());
        assert!(registry.lookup("key").is_none());

        // Deleting an absent key is a no-op
        registry.delete_local("key");
        registry.delete_local("never-added");
        assert!(registry.is_empty());
    }

    #[test]
    fn test_lookup() {
        let registry = CredentialRegistry::new();
        registry.set_local("key", "value");

        assert_eq!(registry.lookup("key"), Some("value".to_string()));
        assert!(registry.lookup("").is_none());
        assert!(registry.lookup("other").is_none());
    }

    #[test]
    fn test_replace_drops_empty_entries() {
        let registry = CredentialRegistry::new();
        registry.set_local("stale", "value");

        let mut map = HashMap::new();
        map.insert("a".to_string(), "1".to_string());
        map.insert("b".to_string(), String::new());
        map.insert(String::new(), "2".to_string());
        registry.replace(map);

        assert_eq!(registry.keys(), vec!["a".to_string()]);
        assert!(registry.lookup("stale").is_none());
    }

    #[test]
    fn test_from_map_and_keys_sorted() {
        let mut map = HashMap::new();
        map.insert("zeta".to_string(), "z".to_string());
        map.insert("alpha".to_string(), "a".to_string());

        let registry = CredentialRegistry::from_map(map);
        assert_eq!(registry.keys(), vec!["alpha".to_string(), "zeta".to_string()]);
        assert_eq!(registry.authenticate("alpha", "a"), Some("a".to_string()));
    }

    #[test]
    fn test_concurrent_readers_and_writer() {
        let registry = Arc::new(CredentialRegistry::new());
        registry.set_local("stable", "value");

        let writer = {
            let registry = registry.clone();
            std::thread::spawn(move || {
                for i in 0..500 {
                    let key = format!("k{}", i % 10);
                    registry.set_local(&key, "v");
                    registry.delete_local(&key);
                }
            })
        };

        let readers: Vec<_> = (0..8)
            .map(|_| {
                let registry = registry.clone();
                std::thread::spawn(move || {
                    for _ in 0..500 {
                        assert_eq!(
                            registry.authenticate("stable", "value"),
                            Some("value".to_string())
                        );
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(registry.keys(), vec!["stable".to_string()]);
    }
