//! CLI error type

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("no TMDB API key: pass --api-key or set TMDB_API_KEY")]
    MissingApiKey,

    #[error("could not determine a data directory; pass --db")]
    NoDataDir,

    #[error("could not create {path}: {source}")]
    CreateDir {
        path: String,
        source: std::io::Error,
    },

    #[error(transparent)]
    Api(#[from] moviecat_lib::error::ApiError),

    #[error(transparent)]
    Store(#[from] moviecat_lib::error::StoreError),

    #[error(transparent)]
    Repository(#[from] moviecat_lib::error::Error),
}
