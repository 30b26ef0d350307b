//! Cache configuration

use std::time::Duration;

/// Configuration for the trending cache.
///
/// # Example
///
/// ```
/// use std::time::Duration;
/// use moviecat_lib::cache::CacheConfig;
///
/// let config = CacheConfig::default()
///     .with_ttl(Duration::from_secs(600))
///     .with_loading_delay(Duration::ZERO);
/// ```
#[derive(Debug, Clone)]
pub struct CacheConfig {
    /// How long a trending list is served without refetching.
    ///
    /// Default: 1 hour
    pub ttl: Duration,

    /// Pause before every remote fetch so a loading indicator is visible even
    /// on fast networks.
    ///
    /// Default: 750 milliseconds
    pub loading_delay: Duration,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl: Duration::from_secs(3600),
            loading_delay: Duration::from_millis(750),
        }
    }
}

impl CacheConfig {
    /// Creates a new cache config with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the TTL.
    pub fn with_ttl(mut self, ttl: Duration) -> Self {
        self.ttl = ttl;
        self
    }

    /// Sets the loading delay.
    pub fn with_loading_delay(mut self, delay: Duration) -> Self {
        self.loading_delay = delay;
        self
    }

    /// Creates a config with the default TTL and no loading delay.
    pub fn no_delay() -> Self {
        Self::default().with_loading_delay(Duration::ZERO)
    }
}
