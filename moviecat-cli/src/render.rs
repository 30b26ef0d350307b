//! Plain-text output

use moviecat_lib::CacheStatus;
use moviecat_lib::model::Movie;
use moviecat_lib::model::MovieDetails;
use moviecat_lib::model::PosterSize;

pub fn movie_line(movie: &Movie, favorite: bool) -> String {
    let year = movie
        .release_year()
        .map(|y| format!(" ({})", y))
        .unwrap_or_default();
    format!(
        "{} {:>8}  {:>4.1}  {}{}",
        if favorite { "*" } else { " " },
        movie.id,
        movie.vote_average,
        movie.title,
        year
    )
}

pub fn cache_note(status: &CacheStatus) -> Option<String> {
    match status {
        CacheStatus::Hit { cached_at, .. } => Some(format!(
            "(cached at {})",
            cached_at.format("%Y-%m-%d %H:%M UTC")
        )),
        CacheStatus::Stale { cached_at, .. } => Some(format!(
            "(offline: showing list from {})",
            cached_at.format("%Y-%m-%d %H:%M UTC")
        )),
        CacheStatus::Miss { .. } | CacheStatus::None => None,
    }
}

pub fn details(details: &MovieDetails, favorite: bool) -> String {
    let mut out = String::new();

    let year = details
        .release_year()
        .map(|y| format!(" ({})", y))
        .unwrap_or_default();
    out.push_str(&format!("{}{}", details.title, year));
    if favorite {
        out.push_str("  [favorite]");
    }
    out.push('\n');

    if let Some(tagline) = details.tagline.as_deref().filter(|t| !t.is_empty()) {
        out.push_str(&format!("  {}\n", tagline));
    }

    out.push_str(&format!(
        "  Rating: {:.1} ({} votes)\n",
        details.vote_average, details.vote_count
    ));
    if let Some(runtime) = details.runtime_display() {
        out.push_str(&format!("  Runtime: {}\n", runtime));
    }
    if !details.genres.is_empty() {
        let genres: Vec<&str> = details.genres.iter().map(|g| g.name.as_str()).collect();
        out.push_str(&format!("  Genres: {}\n", genres.join(", ")));
    }
    if let Some(studio) = details.lead_studio() {
        out.push_str(&format!("  Studio: {}\n", studio));
    }
    out.push_str(&format!(
        "  Audience: {}\n",
        if details.adult { "Adult" } else { "General" }
    ));
    if let Some(poster) = details.poster_url(PosterSize::W500) {
        out.push_str(&format!("  Poster: {}\n", poster));
    }
    if !details.overview.is_empty() {
        out.push_str(&format!("\n  {}\n", details.overview));
    }

    out
}
