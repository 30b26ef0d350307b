//! TMDB HTTP client

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::MovieApi;
use crate::error::ApiError;
use crate::model::MovieDetails;
use crate::model::TimeWindow;
use crate::model::TrendingPage;

/// TMDB API v3 root.
pub const DEFAULT_BASE_URL: &str = "https://api.themoviedb.org/3";

/// Client for the TMDB v3 API.
///
/// This client is cheap to clone (uses `Arc` internally) and can be shared
/// across threads safely.
///
/// # Example
///
/// ```ignore
/// use moviecat_lib::TmdbClient;
///
/// let client = TmdbClient::builder()
///     .api_key(std::env::var("TMDB_API_KEY")?)
///     .timeout(Duration::from_secs(10))
///     .build()?;
/// ```
#[derive(Clone)]
pub struct TmdbClient {
    inner: Arc<TmdbClientInner>,
}

struct TmdbClientInner {
    base_url: String,
    api_key: String,
    http_client: Client,
    timeout: Option<Duration>,
}

impl TmdbClient {
    /// Creates a new builder for constructing a client.
    pub fn builder() -> TmdbClientBuilder<Missing> {
        TmdbClientBuilder::new()
    }

    /// Returns the API root this client talks to.
    pub fn base_url(&self) -> &str {
        &self.inner.base_url
    }

    /// Builds an endpoint URL with the API key and extra query parameters.
    fn endpoint(&self, path: &str, query: &[(&str, &str)]) -> Result<Url, ApiError> {
        let raw = format!(
            "{}/{}",
            self.inner.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        let mut url = Url::parse(&raw).map_err(|e| ApiError::InvalidUrl(format!("{}: {}", raw, e)))?;

        url.query_pairs_mut()
            .extend_pairs(query)
            .append_pair("api_key", &self.inner.api_key);

        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, ApiError> {
        debug!("GET {}", url.path());

        let mut request = self.inner.http_client.get(url);
        if let Some(timeout) = self.inner.timeout {
            request = request.timeout(timeout);
        }

        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(ApiError::http(status.as_u16(), body));
        }

        parse_body(&body)
    }
}

/// Deserializes a JSON body, reporting the path of the field that failed.
pub(crate) fn parse_body<T: DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    let deserializer = &mut serde_json::Deserializer::from_str(body);
    serde_path_to_error::deserialize(deserializer).map_err(|e| {
        ApiError::parse_with_body(format!("{} at '{}'", e.inner(), e.path()), body)
    })
}

#[async_trait]
impl MovieApi for TmdbClient {
    async fn fetch_trending(&self, window: TimeWindow, language: &str) -> Result<TrendingPage, ApiError> {
        let url = self.endpoint(
            &format!("trending/movie/{}", window.as_str()),
            &[("language", language)],
        )?;
        self.get_json(url).await
    }

    async fn fetch_details(&self, movie_id: i64) -> Result<MovieDetails, ApiError> {
        let url = self.endpoint(&format!("movie/{}", movie_id), &[])?;
        self.get_json(url).await
    }
}

// =============================================================================
// Typestate Builder
// =============================================================================

/// Marker type for missing required builder fields.
pub struct Missing;

/// Marker type for set builder fields.
pub struct Set<T>(pub(crate) T);

/// Builder for constructing a [`TmdbClient`].
///
/// The API key is required; [`build`](TmdbClientBuilder::build) only exists
/// once it has been set.
pub struct TmdbClientBuilder<Key> {
    api_key: Key,
    base_url: String,
    timeout: Option<Duration>,
    connect_timeout: Option<Duration>,
    http_client: Option<Client>,
}

impl TmdbClientBuilder<Missing> {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            api_key: Missing,
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: None,
            connect_timeout: None,
            http_client: None,
        }
    }

    /// Sets the TMDB API key (v3 auth).
    pub fn api_key(self, key: impl Into<String>) -> TmdbClientBuilder<Set<String>> {
        TmdbClientBuilder {
            api_key: Set(key.into()),
            base_url: self.base_url,
            timeout: self.timeout,
            connect_timeout: self.connect_timeout,
            http_client: self.http_client,
        }
    }
}

impl Default for TmdbClientBuilder<Missing> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> TmdbClientBuilder<K> {
    /// Overrides the API root.
    ///
    /// Defaults to [`DEFAULT_BASE_URL`].
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the per-request timeout. No timeout beyond the transport's own
    /// by default.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the connection timeout.
    ///
    /// Only applied when the builder creates the HTTP client.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = Some(timeout);
        self
    }

    /// Sets a custom HTTP client.
    pub fn http_client(mut self, client: Client) -> Self {
        self.http_client = Some(client);
        self
    }
}

impl TmdbClientBuilder<Set<String>> {
    /// Builds the [`TmdbClient`].
    pub fn build(self) -> Result<TmdbClient, ApiError> {
        let http_client = match self.http_client {
            Some(client) => client,
            None => {
                let mut builder = Client::builder();
                if let Some(timeout) = self.connect_timeout {
                    builder = builder.connect_timeout(timeout);
                }
                builder.build()?
            }
        };

        Ok(TmdbClient {
            inner: Arc::new(TmdbClientInner {
                base_url: self.base_url,
                api_key: self.api_key.0,
                http_client,
                timeout: self.timeout,
            }),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> TmdbClient {
        TmdbClient::builder().api_key("secret").build().unwrap()
    }

    #[test]
    fn test_trending_endpoint() {
        let url = client()
            .endpoint("trending/movie/week", &[("language", "en-US")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://api.themoviedb.org/3/trending/movie/week?language=en-US&api_key=secret"
        );
    }

    #[test]
    fn test_custom_base_url_with_trailing_slash() {
        let client = TmdbClient::builder()
            .api_key("k")
            .base_url("http://localhost:8080/3/")
            .build()
            .unwrap();
        let url = client.endpoint("/movie/550", &[]).unwrap();
        assert_eq!(url.as_str(), "http://localhost:8080/3/movie/550?api_key=k");
    }

    #[test]
    fn test_invalid_base_url() {
        let client = TmdbClient::builder()
            .api_key("k")
            .base_url("not a url")
            .build()
            .unwrap();
        assert!(matches!(
            client.endpoint("movie/1", &[]),
            Err(ApiError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_parse_error_reports_field_path() {
        let err = parse_body::<TrendingPage>(r#"{"page": 1, "results": [{"id": "x"}]}"#).unwrap_err();
        match err {
            ApiError::Parse { message, body } => {
                assert!(message.contains("results[0].id"), "message was {}", message);
                assert!(body.is_some());
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let client = TmdbClient::builder()
            .api_key("secret")
            .base_url("http://127.0.0.1:9")
            .build()
            .unwrap();

        let err = client.fetch_details(550).await.unwrap_err();
        assert!(matches!(err, ApiError::Network(_)));
        assert!(!err.to_string().contains("secret"));
    }
}
