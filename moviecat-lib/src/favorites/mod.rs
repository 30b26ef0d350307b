//! Favorite movies
//!
//! [`FavoritesStore`] owns the persisted favorite-ID list and publishes every
//! change on a [`watch`] channel. Subscribers always see the latest list first
//! and then every later update.

use std::sync::Arc;

use futures::Stream;
use log::debug;
use log::warn;
use tokio::sync::watch;
use tokio_stream::StreamExt;
use tokio_stream::wrappers::WatchStream;

use crate::codec;
use crate::error::StoreError;
use crate::store::KvStore;

/// Storage key holding the favorite-ID blob.
pub const FAVORITES_KEY: &str = "favorite_movie_ids";

/// Persisted, observable list of favorite movie IDs.
///
/// IDs keep insertion order and never repeat. Every mutation writes the whole
/// list back to storage before publishing it.
///
/// Mutations are a read-modify-write over the published list without a lock
/// around them; two concurrent mutations can overwrite each other.
#[derive(Clone)]
pub struct FavoritesStore {
    store: KvStore,
    ids: Arc<watch::Sender<Vec<i64>>>,
}

impl FavoritesStore {
    /// Loads the favorite list from `store`.
    ///
    /// A missing or unreadable blob loads as an empty list.
    pub async fn load(store: KvStore) -> Result<Self, StoreError> {
        let ids = read_ids(&store).await?;
        debug!("Loaded {} favorite movie IDs", ids.len());

        let (ids, _) = watch::channel(ids);
        Ok(Self {
            store,
            ids: Arc::new(ids),
        })
    }

    /// Adds `movie_id`. Returns `false` if it was already a favorite.
    pub async fn add(&self, movie_id: i64) -> Result<bool, StoreError> {
        let mut ids = self.ids();
        if ids.contains(&movie_id) {
            return Ok(false);
        }

        ids.push(movie_id);
        self.save(ids).await?;
        Ok(true)
    }

    /// Removes `movie_id`. Returns `false` if it was not a favorite.
    pub async fn remove(&self, movie_id: i64) -> Result<bool, StoreError> {
        let mut ids = self.ids();
        let Some(index) = ids.iter().position(|id| *id == movie_id) else {
            return Ok(false);
        };

        ids.remove(index);
        self.save(ids).await?;
        Ok(true)
    }

    /// Adds `movie_id` if absent, removes it otherwise.
    ///
    /// Returns whether the movie is a favorite afterwards.
    pub async fn toggle(&self, movie_id: i64) -> Result<bool, StoreError> {
        if self.contains(movie_id) {
            self.remove(movie_id).await?;
            Ok(false)
        } else {
            self.add(movie_id).await?;
            Ok(true)
        }
    }

    /// Returns `true` if `movie_id` is currently a favorite.
    pub fn contains(&self, movie_id: i64) -> bool {
        self.ids.borrow().contains(&movie_id)
    }

    /// Returns a snapshot of the current favorite IDs.
    pub fn ids(&self) -> Vec<i64> {
        self.ids.borrow().clone()
    }

    /// Returns a receiver for the favorite-ID channel.
    pub fn subscribe(&self) -> watch::Receiver<Vec<i64>> {
        self.ids.subscribe()
    }

    /// Streams the favorite IDs, starting with the current list.
    pub fn all_ids(&self) -> WatchStream<Vec<i64>> {
        WatchStream::new(self.subscribe())
    }

    /// Streams whether `movie_id` is a favorite, starting with the current
    /// state and re-emitting on every change to the list.
    pub fn is_favorite(&self, movie_id: i64) -> impl Stream<Item = bool> + Send + Unpin + 'static {
        self.all_ids().map(move |ids| ids.contains(&movie_id))
    }

    async fn save(&self, ids: Vec<i64>) -> Result<(), StoreError> {
        let bytes = codec::encode(&ids)?;
        self.store.put(FAVORITES_KEY, bytes).await?;

        debug!("Saved favorite movie IDs: {:?}", ids);
        self.ids.send_replace(ids);
        Ok(())
    }
}

async fn read_ids(store: &KvStore) -> Result<Vec<i64>, StoreError> {
    let Some(bytes) = store.get(FAVORITES_KEY).await? else {
        return Ok(Vec::new());
    };

    match codec::decode::<Vec<i64>>(&bytes) {
        Ok(ids) => Ok(dedup_in_order(ids)),
        Err(err) => {
            warn!("Discarding unreadable favorites blob: {}", err);
            Ok(Vec::new())
        }
    }
}

fn dedup_in_order(ids: Vec<i64>) -> Vec<i64> {
    let mut seen = Vec::with_capacity(ids.len());
    for id in ids {
        if !seen.contains(&id) {
            seen.push(id);
        }
    }
    seen
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemoryBackend;
    use crate::store::SqliteBackend;

    async fn empty_store() -> FavoritesStore {
        FavoritesStore::load(KvStore::new(InMemoryBackend::new()))
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_add_is_idempotent() {
        let favorites = empty_store().await;

        assert!(favorites.add(7).await.unwrap());
        assert!(!favorites.add(7).await.unwrap());
        assert_eq!(favorites.ids(), vec![7]);
    }

    #[tokio::test]
    async fn test_remove_absent_is_noop() {
        let favorites = empty_store().await;
        favorites.add(1).await.unwrap();

        let mut rx = favorites.subscribe();
        let _ = rx.borrow_and_update();

        assert!(!favorites.remove(2).await.unwrap());
        assert_eq!(favorites.ids(), vec![1]);
        assert!(!rx.has_changed().unwrap());
    }

    #[tokio::test]
    async fn test_add_remove_round_trip() {
        let favorites = empty_store().await;
        favorites.add(3).await.unwrap();
        let before = favorites.ids();

        favorites.add(5).await.unwrap();
        favorites.remove(5).await.unwrap();
        assert_eq!(favorites.ids(), before);
    }

    #[tokio::test]
    async fn test_keeps_insertion_order() {
        let favorites = empty_store().await;
        for id in [30, 10, 20] {
            favorites.add(id).await.unwrap();
        }
        favorites.remove(10).await.unwrap();
        assert_eq!(favorites.ids(), vec![30, 20]);
    }

    #[tokio::test]
    async fn test_toggle() {
        let favorites = empty_store().await;
        assert!(favorites.toggle(9).await.unwrap());
        assert!(favorites.contains(9));
        assert!(!favorites.toggle(9).await.unwrap());
        assert!(!favorites.contains(9));
    }

    #[tokio::test]
    async fn test_late_subscriber_sees_latest() {
        let favorites = empty_store().await;
        favorites.add(7).await.unwrap();

        let mut ids = favorites.all_ids();
        assert_eq!(ids.next().await, Some(vec![7]));
    }

    #[tokio::test]
    async fn test_every_subscriber_sees_updates() {
        let favorites = empty_store().await;
        let mut first = favorites.all_ids();
        let mut second = favorites.all_ids();
        assert_eq!(first.next().await, Some(vec![]));
        assert_eq!(second.next().await, Some(vec![]));

        favorites.add(1).await.unwrap();
        assert_eq!(first.next().await, Some(vec![1]));
        assert_eq!(second.next().await, Some(vec![1]));
    }

    #[tokio::test]
    async fn test_is_favorite_stream() {
        let favorites = empty_store().await;
        let mut is_fav = favorites.is_favorite(42);
        assert_eq!(is_fav.next().await, Some(false));

        favorites.add(42).await.unwrap();
        assert_eq!(is_fav.next().await, Some(true));

        favorites.remove(42).await.unwrap();
        assert_eq!(is_fav.next().await, Some(false));
    }

    #[tokio::test]
    async fn test_persists_across_reload() {
        let store = KvStore::new(SqliteBackend::open_in_memory().await.unwrap());

        let favorites = FavoritesStore::load(store.clone()).await.unwrap();
        favorites.add(101).await.unwrap();
        favorites.add(202).await.unwrap();
        favorites.remove(101).await.unwrap();

        let reloaded = FavoritesStore::load(store).await.unwrap();
        assert_eq!(reloaded.ids(), vec![202]);
    }

    #[tokio::test]
    async fn test_unreadable_blob_loads_empty() {
        let store = KvStore::new(InMemoryBackend::new());
        store.put(FAVORITES_KEY, b"[1,2,3]".to_vec()).await.unwrap();

        let favorites = FavoritesStore::load(store.clone()).await.unwrap();
        assert!(favorites.ids().is_empty());

        favorites.add(4).await.unwrap();
        let reloaded = FavoritesStore::load(store).await.unwrap();
        assert_eq!(reloaded.ids(), vec![4]);
    }

    #[tokio::test]
    async fn test_duplicate_ids_in_blob_are_collapsed() {
        let store = KvStore::new(InMemoryBackend::new());
        store
            .put(FAVORITES_KEY, codec::encode(&vec![1i64, 2, 1, 3, 2]).unwrap())
            .await
            .unwrap();

        let favorites = FavoritesStore::load(store).await.unwrap();
        assert_eq!(favorites.ids(), vec![1, 2, 3]);
    }
}
