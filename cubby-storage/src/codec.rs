//! The serialization path shared by every backend.
//!
//! All payloads cross exactly one boundary: `encode` on the way in,
//! `decode` on the way out. No backend serializes on its own, so swapping
//! the wire format is a change to this module alone.
//!
//! Failures here are never fatal. A value that will not encode or a payload
//! that will not decode degrades to `None` and is reported at `warn` level;
//! the caller sees plain absence.

use serde::{de::DeserializeOwned, Serialize};
use tracing::warn;

/// Encode a value into the payload bytes stored by the backends.
pub fn encode<T: Serialize>(value: &T) -> Option<Vec<u8>> {
    match serde_json::to_vec(value) {
        Ok(bytes) => Some(bytes),
        Err(e) => {
            warn!("Failed to encode value for caching: {}", e);
            None
        }
    }
}

/// Decode payload bytes back into a value.
///
/// Returns `None` for malformed bytes and for payloads whose shape no longer
/// matches `T` (for example an entry written by an older build).
pub fn decode<T: DeserializeOwned>(bytes: &[u8]) -> Option<T> {
    match serde_json::from_slice(bytes) {
        Ok(value) => Some(value),
        Err(e) => {
            warn!("Failed to decode cached payload ({} bytes): {}", bytes.len(), e);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;
    use std::collections::HashMap;

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
    struct Sample {
        id: u64,
        name: String,
        tags: Vec<String>,
    }

    fn make_sample() -> Sample {
        Sample {
            id: 7,
            name: "seven".to_string(),
            tags: vec!["a".to_string(), "b".to_string()],
        }
    }

    #[test]
    fn test_encode_decode_roundtrip() {
        let sample = make_sample();
        let bytes = encode(&sample).expect("encode should succeed");
        let decoded: Sample = decode(&bytes).expect("decode should succeed");
        assert_eq!(decoded, sample);
    }

    #[test]
    fn test_decode_garbage_is_none() {
        let garbage = b"\x00\x01not json at all";
        let decoded: Option<Sample> = decode(garbage);
        assert!(decoded.is_none());
    }

    #[test]
    fn test_decode_schema_mismatch_is_none() {
        // Valid JSON, but not the shape of Sample.
        let bytes = encode(&vec![1, 2, 3]).expect("encode should succeed");
        let decoded: Option<Sample> = decode(&bytes);
        assert!(decoded.is_none());
    }

    #[test]
    fn test_encode_failure_is_none() {
        // serde_json rejects maps with non-string keys.
        let mut bad = HashMap::new();
        bad.insert(vec![1u8, 2u8], "value");
        assert!(encode(&bad).is_none());
    }

    #[test]
    fn test_decode_empty_is_none() {
        let decoded: Option<Sample> = decode(&[]);
        assert!(decoded.is_none());
    }
}
