//! In-memory backend using DashMap

use async_trait::async_trait;
use dashmap::DashMap;

use super::KvBackend;
use crate::error::StoreError;

/// An in-memory backend backed by a concurrent hash map.
///
/// Data is lost when the process exits. Useful for tests and for running
/// without a data directory.
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    entries: DashMap<(String, String), Vec<u8>>,
}

impl InMemoryBackend {
    /// Creates a new empty backend.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
        }
    }

    /// Returns the number of entries across all partitions.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if no entries are stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn entry_key(partition: &str, key: &str) -> (String, String) {
    (partition.to_string(), key.to_string())
}

#[async_trait]
impl KvBackend for InMemoryBackend {
    async fn get_bytes(&self, partition: &str, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        Ok(self
            .entries
            .get(&entry_key(partition, key))
            .map(|value| value.clone()))
    }

    async fn set_bytes(&self, partition: &str, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        self.entries.insert(entry_key(partition, key), value);
        Ok(())
    }

    async fn delete(&self, partition: &str, key: &str) -> Result<(), StoreError> {
        self.entries.remove(&entry_key(partition, key));
        Ok(())
    }

    async fn keys_with_prefix(&self, partition: &str, prefix: &str) -> Result<Vec<String>, StoreError> {
        let mut keys: Vec<String> = self
            .entries
            .iter()
            .filter(|entry| entry.key().0 == partition && entry.key().1.starts_with(prefix))
            .map(|entry| entry.key().1.clone())
            .collect();
        keys.sort();
        Ok(keys)
    }
}
