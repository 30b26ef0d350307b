//! Blob codec error types

/// Errors produced when encoding or decoding a persisted blob.
///
/// Decode failures are recoverable: callers treat the blob as absent.
#[derive(Debug, thiserror::Error)]
pub enum CodecError {
    /// The blob is too short to contain a version header.
    #[error("Blob truncated: {len} bytes")]
    Truncated { len: usize },

    /// The blob was written with a format version this build cannot read.
    #[error("Unsupported blob version {found}, expected {expected}")]
    UnsupportedVersion { found: u16, expected: u16 },

    /// The value could not be serialized.
    #[error("Blob encode error: {0}")]
    Encode(#[source] bincode::Error),

    /// The payload did not decode into the expected type.
    #[error("Blob decode error: {0}")]
    Decode(#[source] bincode::Error),
}
