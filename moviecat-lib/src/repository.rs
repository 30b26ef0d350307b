//! MovieRepository: trending cache, details and favorites behind one handle

use std::sync::Arc;

use futures::Stream;
use futures::future::join_all;
use log::debug;
use log::warn;
use tokio_stream::wrappers::WatchStream;

use crate::Missing;
use crate::Response;
use crate::Set;
use crate::api::MovieApi;
use crate::cache::CacheConfig;
use crate::cache::CacheEntry;
use crate::cache::TrendingCache;
use crate::clock::Clock;
use crate::clock::SystemClock;
use crate::error::Error;
use crate::favorites::FavoritesStore;
use crate::model::Movie;
use crate::model::MovieDetails;
use crate::model::TimeWindow;
use crate::store::KvStore;

/// Repository-wide settings.
#[derive(Debug, Clone)]
pub struct RepositoryConfig {
    /// Trending cache TTL and loading delay.
    pub cache: CacheConfig,
    /// Language tag sent with trending requests.
    ///
    /// Default: `en-US`
    pub language: String,
}

impl Default for RepositoryConfig {
    fn default() -> Self {
        Self {
            cache: CacheConfig::default(),
            language: "en-US".to_string(),
        }
    }
}

impl RepositoryConfig {
    /// Creates a config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the cache config.
    pub fn with_cache(mut self, cache: CacheConfig) -> Self {
        self.cache = cache;
        self
    }

    /// Sets the request language.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }
}

/// Mediates between the remote catalogue and local storage.
///
/// Trending lists are served from cache while younger than the TTL and fall
/// back to expired cache when a refresh fails. Details are always fetched.
/// Favorites are loaded once at build time and published to subscribers on
/// every change.
///
/// # Example
///
/// ```ignore
/// let repository = MovieRepository::builder()
///     .api(TmdbClient::builder().api_key(key).build()?)
///     .store(KvStore::new(SqliteBackend::open("moviecat.db").await?))
///     .build()
///     .await?;
///
/// let movies = repository.trending_movies(TimeWindow::Week).await?.into_inner();
/// ```
#[derive(Clone)]
pub struct MovieRepository {
    api: Arc<dyn MovieApi>,
    cache: TrendingCache,
    favorites: FavoritesStore,
    config: RepositoryConfig,
}

impl MovieRepository {
    /// Creates a new builder for constructing a repository.
    pub fn builder() -> MovieRepositoryBuilder<Missing, Missing> {
        MovieRepositoryBuilder::new()
    }

    /// Returns the repository config.
    pub fn config(&self) -> &RepositoryConfig {
        &self.config
    }

    /// Returns the favorites store.
    pub fn favorites(&self) -> &FavoritesStore {
        &self.favorites
    }

    /// Returns trending movies for `window`.
    ///
    /// Fails only when the refresh fails and nothing is cached for the window.
    pub async fn trending_movies(&self, window: TimeWindow) -> Result<Response<Vec<Movie>>, Error> {
        self.load_trending(window, false).await
    }

    /// Fetches trending movies for `window` even if the cached list is valid.
    ///
    /// The cached list is kept until the fetch succeeds, so a failed refresh
    /// still falls back to it.
    pub async fn refresh_trending(&self, window: TimeWindow) -> Result<Response<Vec<Movie>>, Error> {
        self.load_trending(window, true).await
    }

    async fn load_trending(&self, window: TimeWindow, force: bool) -> Result<Response<Vec<Movie>>, Error> {
        let ttl = self.config.cache.ttl;

        let cached = match self.cache.read(window).await {
            Ok(entry) => entry,
            Err(err) => {
                warn!("Could not read {} trending cache: {}", window, err);
                None
            }
        };

        if let Some(entry) = cached
            .as_ref()
            .filter(|e| !force && e.is_valid_at(self.cache.now(), ttl))
        {
            debug!("Trending {} served from cache ({} movies)", window, entry.movies.len());
            let expires_at = entry.expires_at(ttl);
            return Ok(Response::cache_hit(entry.movies.clone(), entry.cached_at, expires_at));
        }

        self.loading_delay().await;

        match self.api.fetch_trending(window, &self.config.language).await {
            Ok(page) => {
                let movies = page.results;
                debug!("Fetched {} trending {} movies", movies.len(), window);

                match self.cache.write(window, &movies).await {
                    Ok(cached_at) => {
                        let expires_at = crate::cache::expires_at(cached_at, ttl);
                        Ok(Response::cache_miss(movies, cached_at, expires_at))
                    }
                    Err(err) => {
                        warn!("Could not cache trending {} movies: {}", window, err);
                        Ok(Response::new(movies))
                    }
                }
            }
            Err(err) => match cached {
                Some(CacheEntry {
                    movies, cached_at, ..
                }) => {
                    warn!(
                        "Trending {} refresh failed, serving list cached at {}: {}",
                        window, cached_at, err
                    );
                    let expires_at = crate::cache::expires_at(cached_at, ttl);
                    Ok(Response::stale(movies, cached_at, expires_at))
                }
                None => Err(Error::Fetch(err)),
            },
        }
    }

    /// Fetches details for one movie. Never cached.
    pub async fn movie_details(&self, movie_id: i64) -> Result<MovieDetails, Error> {
        self.loading_delay().await;
        let details = self.api.fetch_details(movie_id).await?;
        debug!("Fetched details for movie {}", movie_id);
        Ok(details)
    }

    /// Fetches details for every favorite concurrently, in favorite order.
    ///
    /// Movies whose fetch fails are logged and left out.
    pub async fn favorite_movie_details(&self) -> Vec<MovieDetails> {
        let ids = self.favorites.ids();
        let results = join_all(ids.iter().map(|&id| self.movie_details(id))).await;

        ids.into_iter()
            .zip(results)
            .filter_map(|(id, result)| match result {
                Ok(details) => Some(details),
                Err(err) => {
                    warn!("Skipping favorite movie {}: {}", id, err);
                    None
                }
            })
            .collect()
    }

    /// Drops the cached trending list for `window`.
    pub async fn invalidate(&self, window: TimeWindow) -> Result<(), Error> {
        self.cache.clear(window).await?;
        Ok(())
    }

    /// Marks `movie_id` as a favorite. Returns `false` if it already was.
    pub async fn add_favorite(&self, movie_id: i64) -> Result<bool, Error> {
        Ok(self.favorites.add(movie_id).await?)
    }

    /// Unmarks `movie_id`. Returns `false` if it was not a favorite.
    pub async fn remove_favorite(&self, movie_id: i64) -> Result<bool, Error> {
        Ok(self.favorites.remove(movie_id).await?)
    }

    /// Flips the favorite state of `movie_id` and returns the new state.
    pub async fn toggle_favorite(&self, movie_id: i64) -> Result<bool, Error> {
        Ok(self.favorites.toggle(movie_id).await?)
    }

    /// Streams whether `movie_id` is a favorite.
    pub fn is_favorite(&self, movie_id: i64) -> impl Stream<Item = bool> + Send + Unpin + 'static {
        self.favorites.is_favorite(movie_id)
    }

    /// Streams the favorite IDs, starting with the current list.
    pub fn all_favorite_ids(&self) -> WatchStream<Vec<i64>> {
        self.favorites.all_ids()
    }

    /// Returns a snapshot of the favorite IDs.
    pub fn favorite_ids(&self) -> Vec<i64> {
        self.favorites.ids()
    }

    async fn loading_delay(&self) {
        let delay = self.config.cache.loading_delay;
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Builder for constructing a [`MovieRepository`].
///
/// # Required Fields
///
/// - `api` - A [`MovieApi`] implementation
/// - `store` - The [`KvStore`] holding the cache and favorites
pub struct MovieRepositoryBuilder<Api, Store> {
    api: Api,
    store: Store,
    config: RepositoryConfig,
    clock: Arc<dyn Clock>,
}

impl MovieRepositoryBuilder<Missing, Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            api: Missing,
            store: Missing,
            config: RepositoryConfig::default(),
            clock: Arc::new(SystemClock),
        }
    }
}

impl Default for MovieRepositoryBuilder<Missing, Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S> MovieRepositoryBuilder<Missing, S> {
    /// Sets the remote catalogue.
    pub fn api<A: MovieApi + 'static>(self, api: A) -> MovieRepositoryBuilder<Set<Arc<dyn MovieApi>>, S> {
        self.shared_api(Arc::new(api))
    }

    /// Sets a remote catalogue that is shared with other owners.
    pub fn shared_api(self, api: Arc<dyn MovieApi>) -> MovieRepositoryBuilder<Set<Arc<dyn MovieApi>>, S> {
        MovieRepositoryBuilder {
            api: Set(api),
            store: self.store,
            config: self.config,
            clock: self.clock,
        }
    }
}

impl<A> MovieRepositoryBuilder<A, Missing> {
    /// Sets the key-value store.
    pub fn store(self, store: KvStore) -> MovieRepositoryBuilder<A, Set<KvStore>> {
        MovieRepositoryBuilder {
            api: self.api,
            store: Set(store),
            config: self.config,
            clock: self.clock,
        }
    }
}

impl<A, S> MovieRepositoryBuilder<A, S> {
    /// Sets the repository config.
    pub fn config(mut self, config: RepositoryConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the clock used to timestamp and age cache entries.
    ///
    /// Defaults to [`SystemClock`].
    pub fn clock<C: Clock + 'static>(mut self, clock: C) -> Self {
        self.clock = Arc::new(clock);
        self
    }
}

impl MovieRepositoryBuilder<Set<Arc<dyn MovieApi>>, Set<KvStore>> {
    /// Loads favorites from the store and builds the [`MovieRepository`].
    pub async fn build(self) -> Result<MovieRepository, Error> {
        let store = self.store.0;
        let favorites = FavoritesStore::load(store.clone()).await?;

        Ok(MovieRepository {
            api: self.api.0,
            cache: TrendingCache::new(store, self.clock),
            favorites,
            config: self.config,
        })
    }
}
