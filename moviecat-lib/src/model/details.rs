//! Full movie details

use serde::Deserialize;
use serde::Serialize;

use super::PosterSize;

/// A genre attached to a movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// A production company credited on a movie.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductionCompany {
    pub id: i64,
    pub name: String,
    pub logo_path: Option<String>,
    #[serde(default)]
    pub origin_country: String,
}

/// Everything the details endpoint returns for one movie.
///
/// A superset of [`Movie`](super::Movie). Never cached.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MovieDetails {
    pub id: i64,
    pub title: String,
    #[serde(default)]
    pub original_title: String,
    #[serde(default)]
    pub overview: String,
    pub tagline: Option<String>,
    pub poster_path: Option<String>,
    pub backdrop_path: Option<String>,
    #[serde(default)]
    pub adult: bool,
    #[serde(default)]
    pub original_language: String,
    #[serde(default)]
    pub popularity: f64,
    pub release_date: Option<String>,
    pub status: Option<String>,
    #[serde(default)]
    pub video: bool,
    #[serde(default)]
    pub vote_average: f64,
    #[serde(default)]
    pub vote_count: i64,
    /// Runtime in minutes.
    pub runtime: Option<i64>,
    #[serde(default)]
    pub genres: Vec<Genre>,
    #[serde(default)]
    pub production_companies: Vec<ProductionCompany>,
    #[serde(default)]
    pub revenue: i64,
    #[serde(default)]
    pub budget: i64,
    pub homepage: Option<String>,
    pub imdb_id: Option<String>,
}

impl MovieDetails {
    /// Returns the full poster URL at the given size, if the movie has a poster.
    pub fn poster_url(&self, size: PosterSize) -> Option<String> {
        self.poster_path.as_deref().map(|path| size.url(path))
    }

    /// Returns the release year, if the release date is known.
    pub fn release_year(&self) -> Option<&str> {
        super::movie::release_year(self.release_date.as_deref())
    }

    /// Formats the runtime as hours and minutes, e.g. `1hr 45m`.
    ///
    /// Returns `None` when TMDB does not know the runtime.
    pub fn runtime_display(&self) -> Option<String> {
        self.runtime.map(format_runtime)
    }

    /// Returns the first credited production company, if any.
    pub fn lead_studio(&self) -> Option<&str> {
        self.production_companies.first().map(|c| c.name.as_str())
    }
}

/// Formats a duration in minutes as `2hr`, `30m`, `1hr 45m` or `0m`.
pub fn format_runtime(total_minutes: i64) -> String {
    if total_minutes < 0 {
        return "Invalid Duration".to_string();
    }

    let hours = total_minutes / 60;
    let minutes = total_minutes % 60;

    match (hours, minutes) {
        (0, 0) => "0m".to_string(),
        (0, m) => format!("{m}m"),
        (h, 0) => format!("{h}hr"),
        (h, m) => format!("{h}hr {m}m"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_runtime() {
        assert_eq!(format_runtime(105), "1hr 45m");
        assert_eq!(format_runtime(120), "2hr");
        assert_eq!(format_runtime(30), "30m");
        assert_eq!(format_runtime(0), "0m");
        assert_eq!(format_runtime(-5), "Invalid Duration");
    }

    #[test]
    fn test_parse_details() {
        let json = r#"{
            "id": 550,
            "title": "Fight Club",
            "original_title": "Fight Club",
            "overview": "A ticking-time-bomb insomniac...",
            "tagline": "Mischief. Mayhem. Soap.",
            "poster_path": "/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg",
            "backdrop_path": null,
            "adult": false,
            "original_language": "en",
            "popularity": 61.4,
            "release_date": "1999-10-15",
            "status": "Released",
            "video": false,
            "vote_average": 8.4,
            "vote_count": 26280,
            "runtime": 139,
            "genres": [{"id": 18, "name": "Drama"}],
            "production_companies": [
                {"id": 508, "name": "Regency Enterprises", "logo_path": "/7cx.png", "origin_country": "US"},
                {"id": 711, "name": "Fox 2000 Pictures", "logo_path": null, "origin_country": "US"}
            ],
            "revenue": 100853753,
            "budget": 63000000,
            "homepage": "http://www.foxmovies.com/movies/fight-club",
            "imdb_id": "tt0137523"
        }"#;

        let details: MovieDetails = serde_json::from_str(json).unwrap();
        assert_eq!(details.id, 550);
        assert_eq!(details.runtime_display().as_deref(), Some("2hr 19m"));
        assert_eq!(details.lead_studio(), Some("Regency Enterprises"));
        assert_eq!(details.genres[0].name, "Drama");
        assert_eq!(details.budget, 63_000_000);
        assert_eq!(details.release_year(), Some("1999"));
        assert_eq!(
            details.poster_url(PosterSize::W500).as_deref(),
            Some("https://image.tmdb.org/t/p/w500/pB8BM7pdSp6B6Ih7QZ4DrQ3PmJK.jpg")
        );
    }

    #[test]
    fn test_unknown_runtime() {
        let details: MovieDetails =
            serde_json::from_str(r#"{"id": 1, "title": "TBA", "runtime": null}"#).unwrap();
        assert_eq!(details.runtime_display(), None);
        assert_eq!(details.lead_studio(), None);
    }
}
