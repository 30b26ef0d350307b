//! Trending-list cache
//!
//! One [`CacheEntry`] per [`TimeWindow`], stored in a [`KvStore`] as a
//! versioned movie blob plus a separate millisecond timestamp. A write fully
//! replaces the entry for its window; the two windows never touch each other.

mod config;

pub use config::*;

use std::sync::Arc;
use std::time::Duration;

use chrono::DateTime;
use chrono::TimeDelta;
use chrono::TimeZone;
use chrono::Utc;
use log::warn;

use crate::clock::Clock;
use crate::codec;
use crate::error::StoreError;
use crate::model::Movie;
use crate::model::TimeWindow;
use crate::store::KvStore;

/// A cached trending list.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    /// The window this list belongs to.
    pub window: TimeWindow,
    /// The movies, in the order the API returned them.
    pub movies: Vec<Movie>,
    /// When the list was written.
    pub cached_at: DateTime<Utc>,
}

impl CacheEntry {
    /// Returns `true` if the entry is younger than `ttl` at `now`.
    ///
    /// An entry whose age is exactly `ttl` is expired.
    pub fn is_valid_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let ttl = TimeDelta::from_std(ttl).unwrap_or(TimeDelta::MAX);
        now - self.cached_at < ttl
    }

    /// Returns when the entry stops being valid.
    pub fn expires_at(&self, ttl: Duration) -> DateTime<Utc> {
        expires_at(self.cached_at, ttl)
    }
}

/// Returns `cached_at + ttl`, saturating at the maximum representable time.
pub fn expires_at(cached_at: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    TimeDelta::from_std(ttl)
        .ok()
        .and_then(|ttl| cached_at.checked_add_signed(ttl))
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

/// Storage key for a window's movie blob.
pub fn data_key(window: TimeWindow) -> &'static str {
    match window {
        TimeWindow::Day => "trending_movies_day",
        TimeWindow::Week => "trending_movies_week",
    }
}

/// Storage key for a window's write timestamp (epoch milliseconds).
pub fn timestamp_key(window: TimeWindow) -> &'static str {
    match window {
        TimeWindow::Day => "trending_movies_day_ts",
        TimeWindow::Week => "trending_movies_week_ts",
    }
}

/// Reads and writes trending lists.
///
/// Reads and writes are not locked against each other: when two refreshes
/// of the same window race, whichever write lands last wins.
#[derive(Clone)]
pub struct TrendingCache {
    store: KvStore,
    clock: Arc<dyn Clock>,
}

impl TrendingCache {
    /// Creates a cache over `store`, timestamping writes with `clock`.
    pub fn new(store: KvStore, clock: Arc<dyn Clock>) -> Self {
        Self { store, clock }
    }

    /// Returns the current time according to the cache's clock.
    pub fn now(&self) -> DateTime<Utc> {
        self.clock.now()
    }

    /// Reads the entry for `window`, regardless of its age.
    ///
    /// A missing or undecodable movie blob yields `None`. A missing timestamp
    /// reads as the epoch, which makes the entry stale but still usable as a
    /// fallback.
    pub async fn read(&self, window: TimeWindow) -> Result<Option<CacheEntry>, StoreError> {
        let Some(bytes) = self.store.get(data_key(window)).await? else {
            return Ok(None);
        };

        let movies: Vec<Movie> = match codec::decode(&bytes) {
            Ok(movies) => movies,
            Err(err) => {
                warn!("Discarding unreadable {} trending cache: {}", window, err);
                return Ok(None);
            }
        };

        let millis = self.store.get_long(timestamp_key(window), 0).await?;
        let cached_at = Utc.timestamp_millis_opt(millis).single().unwrap_or_default();

        Ok(Some(CacheEntry {
            window,
            movies,
            cached_at,
        }))
    }

    /// Replaces the entry for `window` and returns its timestamp.
    ///
    /// The movie blob is written before the timestamp. If the timestamp write
    /// fails, the new list sits under the previous timestamp (or none), so it
    /// can only look older than it is and never extends an old list's TTL.
    pub async fn write(&self, window: TimeWindow, movies: &[Movie]) -> Result<DateTime<Utc>, StoreError> {
        let now = self.clock.now();
        let bytes = codec::encode(movies)?;

        self.store.put(data_key(window), bytes).await?;
        self.store
            .put_long(timestamp_key(window), now.timestamp_millis())
            .await?;

        Ok(now)
    }

    /// Removes the entry for `window`.
    pub async fn clear(&self, window: TimeWindow) -> Result<(), StoreError> {
        self.store.remove(data_key(window)).await?;
        self.store.remove(timestamp_key(window)).await
    }
}
