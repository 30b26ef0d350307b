//! Versioned blob encoding
//!
//! Every blob written to the key-value store starts with a little-endian
//! `u16` format version followed by a bincode payload. A version mismatch is
//! reported as [`CodecError::UnsupportedVersion`] instead of being silently
//! misread.

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::CodecError;

/// Format version written by this build.
pub const FORMAT_VERSION: u16 = 1;

const HEADER_LEN: usize = 2;

/// Encodes a value as a versioned blob.
pub fn encode<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>, CodecError> {
    let payload = bincode::serialize(value).map_err(CodecError::Encode)?;

    let mut bytes = Vec::with_capacity(HEADER_LEN + payload.len());
    bytes.extend_from_slice(&FORMAT_VERSION.to_le_bytes());
    bytes.extend_from_slice(&payload);
    Ok(bytes)
}

/// Decodes a versioned blob.
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Result<T, CodecError> {
    let Some((header, payload)) = bytes.split_first_chunk::<HEADER_LEN>() else {
        return Err(CodecError::Truncated { len: bytes.len() });
    };

    let found = u16::from_le_bytes(*header);
    if found != FORMAT_VERSION {
        return Err(CodecError::UnsupportedVersion {
            found,
            expected: FORMAT_VERSION,
        });
    }

    bincode::deserialize(payload).map_err(CodecError::Decode)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_header_is_written() {
        let bytes = encode(&vec![7i64]).unwrap();
        assert_eq!(&bytes[..2], &FORMAT_VERSION.to_le_bytes());
        assert_eq!(decode::<Vec<i64>>(&bytes).unwrap(), vec![7]);
    }

    #[test]
    fn test_truncated() {
        assert!(matches!(
            decode::<Vec<i64>>(&[1]),
            Err(CodecError::Truncated { len: 1 })
        ));
        assert!(matches!(
            decode::<Vec<i64>>(&[]),
            Err(CodecError::Truncated { len: 0 })
        ));
    }

    #[test]
    fn test_version_mismatch() {
        let mut bytes = encode(&vec![1i64, 2, 3]).unwrap();
        bytes[..2].copy_from_slice(&99u16.to_le_bytes());

        match decode::<Vec<i64>>(&bytes) {
            Err(CodecError::UnsupportedVersion { found, expected }) => {
                assert_eq!(found, 99);
                assert_eq!(expected, FORMAT_VERSION);
            }
            other => panic!("expected version mismatch, got {:?}", other),
        }
    }

    #[test]
    fn test_garbage_payload() {
        let mut bytes = FORMAT_VERSION.to_le_bytes().to_vec();
        bytes.extend_from_slice(&[0xff, 0xff, 0xff]);
        assert!(matches!(
            decode::<Vec<i64>>(&bytes),
            Err(CodecError::Decode(_))
        ));
    }

    #[test]
    fn test_legacy_json_blob_is_rejected() {
        // Blobs from before the versioned format were plain JSON arrays.
        assert!(decode::<Vec<i64>>(b"[101,202]").is_err());
    }
}
