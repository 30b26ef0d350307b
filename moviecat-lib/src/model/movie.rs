//! Movie summaries as returned by trending lists

use serde::Deserialize;
use serde::Serialize;

use super::PosterSize;

/// A movie summary.
///
/// Produced by the trending endpoint and persisted as-is in the trending
/// cache, so every field must round-trip through the blob codec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    /// TMDB movie ID.
    pub id: i64,
    /// Localized title.
    pub title: String,
    /// Title in the original language.
    #[serde(default)]
    pub original_title: String,
    /// Plot summary.
    #[serde(default)]
    pub overview: String,
    /// Poster path relative to the image base URL.
    pub poster_path: Option<String>,
    /// Backdrop path relative to the image base URL.
    pub backdrop_path: Option<String>,
    /// Media type reported by the trending endpoint (always `movie` here).
    pub media_type: Option<String>,
    /// Whether the movie is flagged as adult content.
    #[serde(default)]
    pub adult: bool,
    /// ISO 639-1 code of the original language.
    #[serde(default)]
    pub original_language: String,
    /// Genre IDs.
    #[serde(default)]
    pub genre_ids: Vec<i64>,
    /// TMDB popularity score.
    #[serde(default)]
    pub popularity: f64,
    /// Release date (`YYYY-MM-DD`).
    pub release_date: Option<String>,
    /// Whether this entry is a video rather than a feature.
    #[serde(default)]
    pub video: bool,
    /// Average user rating, 0–10.
    #[serde(default)]
    pub vote_average: f64,
    /// Number of user ratings.
    #[serde(default)]
    pub vote_count: i64,
}

impl Movie {
    /// Returns the full poster URL at the given size, if the movie has a poster.
    pub fn poster_url(&self, size: PosterSize) -> Option<String> {
        self.poster_path.as_deref().map(|path| size.url(path))
    }

    /// Returns the release year, if the release date is known.
    pub fn release_year(&self) -> Option<&str> {
        release_year(self.release_date.as_deref())
    }
}

pub(crate) fn release_year(date: Option<&str>) -> Option<&str> {
    date.and_then(|date| date.get(..4))
        .filter(|year| year.chars().all(|c| c.is_ascii_digit()))
}

/// One page of trending results.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendingPage {
    pub page: i64,
    pub results: Vec<Movie>,
    pub total_pages: i64,
    pub total_results: i64,
}
