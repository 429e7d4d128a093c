//! In-memory session store - used by tests and when no session file is configured.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;

use storefront_core::ports::{SessionError, SessionStore};

/// In-memory session store using a HashMap with async RwLock.
///
/// Note: Credentials are lost on process exit.
pub struct InMemorySessionStore {
    values: RwLock<HashMap<String, String>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            values: RwLock::new(HashMap::new()),
        }
    }

    /// Store pre-seeded with `pairs`.
    pub fn with_values<'a>(pairs: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let values = pairs
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            values: RwLock::new(values),
        }
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, key: &str) -> Result<Option<String>, SessionError> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), SessionError> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), SessionError> {
        self.values.write().await.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_and_get() {
        let store = InMemorySessionStore::new();
        store.set("token", "abc").await.unwrap();
        assert_eq!(store.get("token").await.unwrap(), Some("abc".to_string()));
    }

    #[tokio::test]
    async fn test_remove() {
        let store = InMemorySessionStore::with_values([("token", "abc")]);
        store.remove("token").await.unwrap();
        assert_eq!(store.get("token").await.unwrap(), None);
    }
}
