//! Error types

mod api;
mod codec;
mod store;
mod window;

pub use api::*;
pub use codec::*;
pub use store::*;
pub use window::*;

/// Errors returned by [`MovieRepository`](crate::MovieRepository).
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The remote fetch failed and there was no cached data to fall back on.
    #[error("Fetch failed: {0}")]
    Fetch(#[from] ApiError),

    /// Reading or writing local storage failed.
    #[error("Storage error: {0}")]
    Store(#[from] StoreError),
}

impl Error {
    /// Returns `true` if this is a remote fetch failure.
    pub fn is_fetch(&self) -> bool {
        matches!(self, Self::Fetch(_))
    }

    /// Returns the underlying API error, if this is a fetch failure.
    pub fn api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Fetch(err) => Some(err),
            Self::Store(_) => None,
        }
    }
}
