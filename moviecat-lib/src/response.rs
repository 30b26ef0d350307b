//! Response wrapper with cache status

use chrono::DateTime;
use chrono::Utc;

/// A repository result that records where the data came from.
///
/// # Example
///
/// ```ignore
/// let response = repository.trending_movies(TimeWindow::Day).await?;
///
/// if response.is_stale() {
///     println!("Offline, showing list from {:?}", response.cached_at());
/// }
///
/// let movies = response.into_inner();
/// ```
#[derive(Debug, Clone)]
pub struct Response<T> {
    data: T,
    /// Information about whether this response came from cache.
    pub cache: CacheStatus,
}

impl<T> Response<T> {
    /// Creates a new response with no cache involvement.
    pub fn new(data: T) -> Self {
        Self {
            data,
            cache: CacheStatus::None,
        }
    }

    /// Creates a new response indicating a cache miss (fresh fetch, now cached).
    pub fn cache_miss(data: T, cached_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            data,
            cache: CacheStatus::Miss {
                cached_at,
                expires_at,
            },
        }
    }

    /// Creates a new response indicating a cache hit.
    pub fn cache_hit(data: T, cached_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            data,
            cache: CacheStatus::Hit {
                cached_at,
                expires_at,
            },
        }
    }

    /// Creates a new response serving expired data after a failed refresh.
    pub fn stale(data: T, cached_at: DateTime<Utc>, expires_at: DateTime<Utc>) -> Self {
        Self {
            data,
            cache: CacheStatus::Stale {
                cached_at,
                expires_at,
            },
        }
    }

    /// Returns `true` if this response was served from a valid cache entry.
    pub fn is_cached(&self) -> bool {
        self.cache.is_hit()
    }

    /// Returns `true` if this response is a stale fallback.
    pub fn is_stale(&self) -> bool {
        self.cache.is_stale()
    }

    /// Returns `true` if the data was fetched by this call.
    pub fn is_fresh(&self) -> bool {
        matches!(self.cache, CacheStatus::None | CacheStatus::Miss { .. })
    }

    /// Returns when the data was cached, if applicable.
    pub fn cached_at(&self) -> Option<DateTime<Utc>> {
        match &self.cache {
            CacheStatus::None => None,
            CacheStatus::Miss { cached_at, .. }
            | CacheStatus::Hit { cached_at, .. }
            | CacheStatus::Stale { cached_at, .. } => Some(*cached_at),
        }
    }

    /// Returns when the cached data expires (or expired), if applicable.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        match &self.cache {
            CacheStatus::None => None,
            CacheStatus::Miss { expires_at, .. }
            | CacheStatus::Hit { expires_at, .. }
            | CacheStatus::Stale { expires_at, .. } => Some(*expires_at),
        }
    }

    /// Returns a reference to the inner data.
    pub fn data(&self) -> &T {
        &self.data
    }

    /// Consumes the response and returns the inner data.
    pub fn into_inner(self) -> T {
        self.data
    }

    /// Maps the inner data using the provided function.
    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> Response<U> {
        Response {
            data: f(self.data),
            cache: self.cache,
        }
    }
}

/// Cache status for a response.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    /// Cache was not involved (or the fresh result could not be cached).
    None,
    /// Cache miss - data was freshly fetched and is now cached.
    Miss {
        cached_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    },
    /// Cache hit - data was returned from a valid cache entry.
    Hit {
        cached_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    },
    /// The refresh failed and expired cached data was returned instead.
    Stale {
        cached_at: DateTime<Utc>,
        expires_at: DateTime<Utc>,
    },
}

impl CacheStatus {
    /// Returns `true` if this is a cache hit.
    pub fn is_hit(&self) -> bool {
        matches!(self, Self::Hit { .. })
    }

    /// Returns `true` if this is a cache miss.
    pub fn is_miss(&self) -> bool {
        matches!(self, Self::Miss { .. })
    }

    /// Returns `true` if this is a stale fallback.
    pub fn is_stale(&self) -> bool {
        matches!(self, Self::Stale { .. })
    }

    /// Returns `true` if caching was not involved.
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}
