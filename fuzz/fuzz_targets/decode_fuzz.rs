//! Fuzz test for the cache payload decoder
//!
//! This fuzz target feeds arbitrary byte sequences to `codec::decode` to find:
//! - Panics or crashes
//! - Infinite loops
//! - Memory safety issues
//!
//! Run with: cargo +nightly fuzz run decode_fuzz -- -max_total_time=60

#![no_main]

use cubby_storage::codec;
use libfuzzer_sys::fuzz_target;
use serde::Deserialize;

#[derive(Debug, Deserialize)]
struct Entry {
    id: u64,
    name: String,
}

fuzz_target!(|data: &[u8]| {
    // A stored payload can be any byte sequence after corruption. Decoding
    // must degrade to absence, never panic, for any target type.
    let _: Option<serde_json::Value> = codec::decode(data);
    let _: Option<Vec<String>> = codec::decode(data);

    if let Some(Entry { id, name }) = codec::decode(data) {
        // Decoded values must be fully formed.
        let _ = id;
        assert!(name.len() <= data.len(), "decoded field cannot outgrow its payload");
    }
});
