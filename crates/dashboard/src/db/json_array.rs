//! A JSON array of records stored under one key.

use std::marker::PhantomData;
use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tokio::sync::Mutex;

use super::{KvStore, RepositoryError};

/// Typed view of the JSON array stored under a single key.
///
/// Every [`update`](Self::update) reads the whole array, mutates it and
/// writes it back while holding this key's lock, so concurrent mutations
/// through the same `JsonArray` never interleave.
pub struct JsonArray<T> {
    store: Arc<dyn KvStore>,
    key: &'static str,
    lock: Mutex<()>,
    _records: PhantomData<fn() -> T>,
}

impl<T> JsonArray<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Create a view of `key` in `store`.
    #[must_use]
    pub fn new(store: Arc<dyn KvStore>, key: &'static str) -> Self {
        Self {
            store,
            key,
            lock: Mutex::new(()),
            _records: PhantomData,
        }
    }

    /// The key this array is stored under.
    #[must_use]
    pub const fn key(&self) -> &'static str {
        self.key
    }

    /// Read the current array. A missing or empty value reads as `[]`.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::DataCorruption` if the stored value is not a
    /// JSON array of `T`.
    pub async fn load(&self) -> Result<Vec<T>, RepositoryError> {
        let _guard = self.lock.lock().await;
        self.read().await
    }

    /// Apply `mutate` to the array and persist the result.
    ///
    /// Nothing is written when `mutate` returns an error.
    ///
    /// # Errors
    ///
    /// Returns the error from `mutate`, or a storage error from reading or
    /// writing the array.
    pub async fn update<R, F>(&self, mutate: F) -> Result<R, RepositoryError>
    where
        F: FnOnce(&mut Vec<T>) -> Result<R, RepositoryError> + Send,
    {
        let _guard = self.lock.lock().await;
        let mut records = self.read().await?;
        let output = mutate(&mut records)?;
        let encoded = serde_json::to_string(&records)?;
        self.store.set(self.key, &encoded).await?;
        Ok(output)
    }

    async fn read(&self) -> Result<Vec<T>, RepositoryError> {
        let Some(raw) = self.store.get(self.key).await? else {
            return Ok(Vec::new());
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }
        serde_json::from_str(&raw).map_err(|e| {
            RepositoryError::DataCorruption(format!("malformed array under `{}`: {e}", self.key))
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::db::MemoryKvStore;

    fn array(store: &Arc<MemoryKvStore>) -> JsonArray<u32> {
        JsonArray::new(store.clone(), "numbers")
    }

    #[tokio::test]
    async fn test_missing_key_is_empty() {
        let store = Arc::new(MemoryKvStore::new());
        assert!(array(&store).load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_value_is_empty() {
        let store = Arc::new(MemoryKvStore::new());
        store.set("numbers", "").await.unwrap();
        assert!(array(&store).load().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_update_persists() {
        let store = Arc::new(MemoryKvStore::new());
        let numbers = array(&store);
        numbers
            .update(|items| {
                items.insert(0, 1);
                items.insert(0, 2);
                Ok(())
            })
            .await
            .unwrap();

        assert_eq!(numbers.load().await.unwrap(), vec![2, 1]);
        assert_eq!(store.get("numbers").await.unwrap().as_deref(), Some("[2,1]"));
    }

    #[tokio::test]
    async fn test_failed_update_writes_nothing() {
        let store = Arc::new(MemoryKvStore::new());
        let numbers = array(&store);
        let result: Result<(), _> = numbers
            .update(|items| {
                items.push(7);
                Err(RepositoryError::NotFound)
            })
            .await;

        assert!(matches!(result, Err(RepositoryError::NotFound)));
        assert_eq!(store.get("numbers").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_malformed_json_is_corruption() {
        let store = Arc::new(MemoryKvStore::new());
        store.set("numbers", "{not json").await.unwrap();
        assert!(matches!(
            array(&store).load().await,
            Err(RepositoryError::DataCorruption(_))
        ));
    }

    #[tokio::test]
    async fn test_concurrent_updates_do_not_lose_writes() {
        let store = Arc::new(MemoryKvStore::new());
        let numbers = Arc::new(array(&store));

        let tasks: Vec<_> = (0..20)
            .map(|n| {
                let numbers = numbers.clone();
                tokio::spawn(async move {
                    numbers
                        .update(|items| {
                            items.push(n);
                            Ok(())
                        })
                        .await
                })
            })
            .collect();
        for task in tasks {
            task.await.unwrap().unwrap();
        }

        assert_eq!(numbers.load().await.unwrap().len(), 20);
    }
}
