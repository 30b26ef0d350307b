//! Remote movie catalogue
//!
//! [`MovieApi`] is the seam between the repository and the network.
//! [`TmdbClient`](crate::TmdbClient) is the production implementation; tests
//! substitute their own.

use async_trait::async_trait;

use crate::error::ApiError;
use crate::model::MovieDetails;
use crate::model::TimeWindow;
use crate::model::TrendingPage;

/// The two remote calls the repository needs.
#[async_trait]
pub trait MovieApi: Send + Sync {
    /// Fetches the first page of trending movies for `window`, localized to
    /// `language` (a BCP 47 tag such as `en-US`).
    async fn fetch_trending(&self, window: TimeWindow, language: &str) -> Result<TrendingPage, ApiError>;

    /// Fetches the details of one movie.
    async fn fetch_details(&self, movie_id: i64) -> Result<MovieDetails, ApiError>;
}
