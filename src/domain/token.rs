use crate::domain::ports::TokenStore;

/// Reads the credential token, folding every "not authenticated" shape into `None`:
/// a missing key, a blank value, or a store that cannot be read at all.
pub fn read_token(store: &dyn TokenStore, key: &str) -> Option<String> {
    match store.get(key) {
        Ok(Some(token)) if !token.trim().is_empty() => Some(token),
        Ok(_) => None,
        Err(e) => {
            tracing::debug!("Token store unreadable, treating as logged out: {}", e);
            None
        }
    }
}

pub fn is_authenticated(store: &dyn TokenStore, key: &str) -> bool {
    read_token(store, key).is_some()
}

/// Best-effort removal; a store that refuses the write leaves nothing else to do.
pub fn clear_token(store: &dyn TokenStore, key: &str) {
    if let Err(e) = store.remove(key) {
        tracing::warn!("Failed to clear credential token: {}", e);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::storage::MemoryTokenStore;
    use crate::utils::error::{ClientError, Result};

    struct DisabledStore;

    impl TokenStore for DisabledStore {
        fn get(&self, _key: &str) -> Result<Option<String>> {
            Err(ClientError::StorageError {
                message: "storage disabled".to_string(),
            })
        }

        fn set(&self, _key: &str, _value: &str) -> Result<()> {
            Err(ClientError::StorageError {
                message: "storage disabled".to_string(),
            })
        }

        fn remove(&self, _key: &str) -> Result<()> {
            Err(ClientError::StorageError {
                message: "storage disabled".to_string(),
            })
        }
    }

    #[test]
    fn test_blank_tokens_are_absent() {
        let store = MemoryTokenStore::new();
        assert_eq!(read_token(&store, "token"), None);

        store.set("token", "").unwrap();
        assert_eq!(read_token(&store, "token"), None);

        store.set("token", "   ").unwrap();
        assert_eq!(read_token(&store, "token"), None);

        store.set("token", "abc123").unwrap();
        assert_eq!(read_token(&store, "token").as_deref(), Some("abc123"));
    }

    #[test]
    fn test_unreadable_store_is_logged_out() {
        assert!(!is_authenticated(&DisabledStore, "token"));
        clear_token(&DisabledStore, "token");
    }
}
