//! Local storage error types

use super::CodecError;

/// Errors from the durable key-value store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] async_sqlite::Error),

    #[error("Could not encode value: {0}")]
    Codec(#[from] CodecError),
}
