//! Durable key-value storage
//!
//! A [`KvBackend`] stores raw bytes per `(partition, key)`. [`KvStore`] scopes
//! a backend to one partition and adds the integer accessors the trending
//! cache uses for timestamps.

mod memory;
mod sqlite;

pub use memory::*;
pub use sqlite::*;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StoreError;

/// Partition used when none is configured.
pub const DEFAULT_PARTITION: &str = "movie_cache_prefs";

/// Backend trait for raw byte storage.
#[async_trait]
pub trait KvBackend: Send + Sync {
    /// Get raw bytes for a key.
    async fn get_bytes(&self, partition: &str, key: &str) -> Result<Option<Vec<u8>>, StoreError>;

    /// Set raw bytes for a key, replacing any previous value.
    async fn set_bytes(&self, partition: &str, key: &str, value: Vec<u8>) -> Result<(), StoreError>;

    /// Delete a key. Deleting a missing key is not an error.
    async fn delete(&self, partition: &str, key: &str) -> Result<(), StoreError>;

    /// Get all keys in a partition starting with `prefix`.
    async fn keys_with_prefix(&self, partition: &str, prefix: &str) -> Result<Vec<String>, StoreError>;
}

/// A key-value store scoped to a single partition.
///
/// Cheap to clone; clones share the backend.
#[derive(Clone)]
pub struct KvStore {
    backend: Arc<dyn KvBackend>,
    partition: Arc<str>,
}

impl KvStore {
    /// Creates a store over `backend` using the default partition.
    pub fn new(backend: impl KvBackend + 'static) -> Self {
        Self::from_shared(Arc::new(backend))
    }

    /// Creates a store over a shared backend using the default partition.
    pub fn from_shared(backend: Arc<dyn KvBackend>) -> Self {
        Self {
            backend,
            partition: Arc::from(DEFAULT_PARTITION),
        }
    }

    /// Returns a store over the same backend scoped to another partition.
    pub fn with_partition(&self, partition: impl AsRef<str>) -> Self {
        Self {
            backend: Arc::clone(&self.backend),
            partition: Arc::from(partition.as_ref()),
        }
    }

    /// Returns the partition name.
    pub fn partition(&self) -> &str {
        &self.partition
    }

    /// Get the blob stored under `key`.
    pub async fn get(&self, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        self.backend.get_bytes(&self.partition, key).await
    }

    /// Store a blob under `key`.
    pub async fn put(&self, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        self.backend.set_bytes(&self.partition, key, value).await
    }

    /// Get an integer, or `default` if the key is missing or not an integer.
    pub async fn get_long(&self, key: &str, default: i64) -> Result<i64, StoreError> {
        let value = self.get(key).await?.and_then(|bytes| {
            let bytes: [u8; 8] = bytes.as_slice().try_into().ok()?;
            Some(i64::from_le_bytes(bytes))
        });
        Ok(value.unwrap_or(default))
    }

    /// Store an integer under `key`.
    pub async fn put_long(&self, key: &str, value: i64) -> Result<(), StoreError> {
        self.put(key, value.to_le_bytes().to_vec()).await
    }

    /// Delete `key`.
    pub async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.backend.delete(&self.partition, key).await
    }

    /// List every key in this partition.
    pub async fn keys(&self) -> Result<Vec<String>, StoreError> {
        self.backend.keys_with_prefix(&self.partition, "").await
    }
}

impl std::fmt::Debug for KvStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KvStore")
            .field("partition", &self.partition)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_long_round_trip_and_default() {
        let store = KvStore::new(InMemoryBackend::new());

        assert_eq!(store.get_long("ts", 0).await.unwrap(), 0);
        store.put_long("ts", 1_714_564_800_123).await.unwrap();
        assert_eq!(store.get_long("ts", 0).await.unwrap(), 1_714_564_800_123);
    }

    #[tokio::test]
    async fn test_long_with_wrong_width_reads_default() {
        let store = KvStore::new(InMemoryBackend::new());
        store.put("ts", vec![1, 2, 3]).await.unwrap();
        assert_eq!(store.get_long("ts", -1).await.unwrap(), -1);
    }

    #[tokio::test]
    async fn test_partitions_are_isolated() {
        let prefs = KvStore::new(InMemoryBackend::new());
        let other = prefs.with_partition("other");

        prefs.put("key", b"prefs".to_vec()).await.unwrap();
        assert_eq!(other.get("key").await.unwrap(), None);

        other.put("key", b"other".to_vec()).await.unwrap();
        assert_eq!(prefs.get("key").await.unwrap(), Some(b"prefs".to_vec()));
        assert_eq!(prefs.partition(), DEFAULT_PARTITION);
    }
}
