//! Image URLs

/// Base URL for TMDB images. Sizes and relative paths are appended to it.
pub const IMAGE_BASE_URL: &str = "https://image.tmdb.org/t/p";

/// Poster width variants served by the image CDN.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PosterSize {
    /// Thumbnail width used in lists.
    W185,
    /// Width used on detail screens.
    #[default]
    W500,
    /// Full resolution.
    Original,
}

impl PosterSize {
    /// Returns the path segment for this size.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::W185 => "w185",
            Self::W500 => "w500",
            Self::Original => "original",
        }
    }

    /// Combines a relative image path with the base URL at this size.
    pub fn url(&self, path: &str) -> String {
        format!(
            "{}/{}/{}",
            IMAGE_BASE_URL,
            self.as_str(),
            path.trim_start_matches('/')
        )
    }
}
