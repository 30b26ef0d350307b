//! SQLite-backed persistent key-value storage.

use std::path::Path;

use async_sqlite::Client;
use async_sqlite::ClientBuilder;
use async_sqlite::JournalMode;
use async_sqlite::rusqlite;
use async_trait::async_trait;

use super::KvBackend;
use crate::error::StoreError;

/// A persistent backend stored in a SQLite database file.
///
/// Statements run on the async-sqlite connection thread, so callers on the
/// async runtime never block on disk I/O.
///
/// # Example
///
/// ```ignore
/// use moviecat_lib::store::{KvStore, SqliteBackend};
///
/// let backend = SqliteBackend::open("moviecat.db").await?;
/// let store = KvStore::new(backend);
/// ```
pub struct SqliteBackend {
    client: Client,
}

impl SqliteBackend {
    /// Opens the database at `path`, creating the file and table if needed.
    pub async fn open(path: impl AsRef<Path>) -> Result<Self, StoreError> {
        let client = ClientBuilder::new()
            .path(path)
            .journal_mode(JournalMode::Wal)
            .open()
            .await?;

        Self::init_schema(&client).await?;

        Ok(Self { client })
    }

    /// Opens an in-memory database. Data is lost when the backend is dropped.
    pub async fn open_in_memory() -> Result<Self, StoreError> {
        let client = ClientBuilder::new().path(":memory:").open().await?;

        Self::init_schema(&client).await?;

        Ok(Self { client })
    }

    async fn init_schema(client: &Client) -> Result<(), StoreError> {
        client
            .conn(|conn| {
                conn.execute(
                    "CREATE TABLE IF NOT EXISTS kv (
                        partition TEXT NOT NULL,
                        key TEXT NOT NULL,
                        value BLOB NOT NULL,
                        PRIMARY KEY (partition, key)
                    )",
                    [],
                )
            })
            .await?;
        Ok(())
    }
}

#[async_trait]
impl KvBackend for SqliteBackend {
    async fn get_bytes(&self, partition: &str, key: &str) -> Result<Option<Vec<u8>>, StoreError> {
        let partition = partition.to_string();
        let key = key.to_string();

        let value = self
            .client
            .conn(move |conn| {
                let mut stmt =
                    conn.prepare("SELECT value FROM kv WHERE partition = ? AND key = ?")?;
                let mut rows = stmt.query(rusqlite::params![partition, key])?;
                match rows.next()? {
                    Some(row) => Ok(Some(row.get::<_, Vec<u8>>(0)?)),
                    None => Ok(None),
                }
            })
            .await?;

        Ok(value)
    }

    async fn set_bytes(&self, partition: &str, key: &str, value: Vec<u8>) -> Result<(), StoreError> {
        let partition = partition.to_string();
        let key = key.to_string();

        self.client
            .conn(move |conn| {
                conn.execute(
                    "INSERT INTO kv (partition, key, value) VALUES (?, ?, ?)
                     ON CONFLICT(partition, key) DO UPDATE SET value = excluded.value",
                    rusqlite::params![partition, key, value],
                )
            })
            .await?;

        Ok(())
    }

    async fn delete(&self, partition: &str, key: &str) -> Result<(), StoreError> {
        let partition = partition.to_string();
        let key = key.to_string();

        self.client
            .conn(move |conn| {
                conn.execute(
                    "DELETE FROM kv WHERE partition = ? AND key = ?",
                    rusqlite::params![partition, key],
                )
            })
            .await?;

        Ok(())
    }

    async fn keys_with_prefix(&self, partition: &str, prefix: &str) -> Result<Vec<String>, StoreError> {
        let partition = partition.to_string();
        let prefix = prefix.to_string();

        // substr instead of LIKE: keys contain `_`, which LIKE treats as a wildcard.
        let keys = self
            .client
            .conn(move |conn| {
                let mut stmt = conn.prepare(
                    "SELECT key FROM kv
                     WHERE partition = ?1 AND substr(key, 1, length(?2)) = ?2
                     ORDER BY key",
                )?;
                let rows = stmt.query_map(rusqlite::params![partition, prefix], |row| row.get(0))?;
                rows.collect::<Result<Vec<String>, _>>()
            })
            .await?;

        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_set_get_overwrite() {
        let backend = SqliteBackend::open_in_memory().await.unwrap();

        assert_eq!(backend.get_bytes("p", "k").await.unwrap(), None);

        backend.set_bytes("p", "k", vec![1, 2]).await.unwrap();
        backend.set_bytes("p", "k", vec![3]).await.unwrap();
        assert_eq!(backend.get_bytes("p", "k").await.unwrap(), Some(vec![3]));

        backend.delete("p", "k").await.unwrap();
        assert_eq!(backend.get_bytes("p", "k").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_prefix_does_not_treat_underscore_as_wildcard() {
        let backend = SqliteBackend::open_in_memory().await.unwrap();
        backend.set_bytes("p", "trending_day", vec![0]).await.unwrap();
        backend.set_bytes("p", "trendingXday", vec![0]).await.unwrap();
        backend.set_bytes("q", "trending_week", vec![0]).await.unwrap();

        let keys = backend.keys_with_prefix("p", "trending_").await.unwrap();
        assert_eq!(keys, vec!["trending_day".to_string()]);
    }

    #[tokio::test]
    async fn test_file_backend_persists_across_reopen() {
        let path = std::env::temp_dir().join(format!(
            "moviecat-kv-test-{}.db",
            std::process::id()
        ));
        let _ = std::fs::remove_file(&path);

        {
            let backend = SqliteBackend::open(&path).await.unwrap();
            backend.set_bytes("p", "k", vec![42]).await.unwrap();
        }

        let backend = SqliteBackend::open(&path).await.unwrap();
        assert_eq!(backend.get_bytes("p", "k").await.unwrap(), Some(vec![42]));

        drop(backend);
        for suffix in ["", "-wal", "-shm"] {
            let _ = std::fs::remove_file(format!("{}{}", path.display(), suffix));
        }
    }
}
