//! In-memory cache bound to a single value type.
//!
//! Unlike the durable backends, a [`MemoryBackend`] commits to one value
//! type for its whole lifetime; the binding is the type parameter instead of
//! a per-call one. Isolation is per-instance rather than per-namespace: two
//! instances never share entries, and dropping the instance drops the cache.
//!
//! Entries hold *encoded payloads*, not live values, so a value that fails
//! to encode or a payload that fails to decode behaves exactly as it would
//! on disk.
//!
//! # Thread Safety
//!
//! Concurrent load/save/remove from any number of threads is safe; the
//! concurrent map underneath provides all synchronization, and the backend
//! adds no locking of its own. Last write wins; there are no multi-call
//! transactions.

use crate::codec;
use crate::traits::{CacheBackend, CacheStats, StatCounters};
use cubby_core::Namespace;
use dashmap::DashMap;
use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;
use tracing::debug;

/// Volatile cache backend for values of type `T`.
///
/// # Example
///
/// ```ignore
/// use cubby_storage::MemoryBackend;
///
/// let backend: MemoryBackend<User> = MemoryBackend::new();
/// backend.save(&user, "user1");
/// let cached = backend.load("user1");
/// ```
pub struct MemoryBackend<T> {
    entries: DashMap<String, Vec<u8>>,
    stats: StatCounters,
    /// fn-pointer variance keeps the backend Send + Sync without
    /// requiring it of `T`.
    _marker: PhantomData<fn() -> T>,
}

impl<T> MemoryBackend<T> {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self {
            entries: DashMap::new(),
            stats: StatCounters::default(),
            _marker: PhantomData,
        }
    }

    /// Remove the entry under `key`. No-op when the key is absent.
    pub fn remove(&self, key: &str) {
        if self.entries.remove(key).is_some() {
            debug!("Removed in-memory entry {:?}", key);
        }
    }

    /// Remove every entry in this instance.
    pub fn clear_all(&self) {
        self.entries.clear();
    }

    /// Whether an entry is present under `key`. Does not count as a hit
    /// or miss.
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    /// Number of entries currently held.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether the backend holds no entries.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Snapshot of this backend's hit/miss/store counters.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }
}

impl<T> MemoryBackend<T>
where
    T: Serialize + DeserializeOwned,
{
    /// Get the decoded value stored under `key`, if any.
    pub fn load(&self, key: &str) -> Option<T> {
        let payload = match self.entries.get(key) {
            Some(payload) => payload,
            None => {
                self.stats.record_miss();
                debug!("Cache miss for in-memory entry {:?}", key);
                return None;
            }
        };

        match codec::decode(payload.value()) {
            Some(value) => {
                self.stats.record_hit();
                Some(value)
            }
            None => {
                self.stats.record_miss();
                None
            }
        }
    }

    /// Encode `value` and store it under `key`, replacing any prior entry.
    pub fn save(&self, value: &T, key: &str) {
        let Some(bytes) = codec::encode(value) else {
            return;
        };
        let size = bytes.len();
        self.entries.insert(key.to_string(), bytes);
        self.stats.record_store();
        debug!("Stored {} bytes for in-memory entry {:?}", size, key);
    }
}

impl<T> Default for MemoryBackend<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> CacheBackend<T> for MemoryBackend<T>
where
    T: Serialize + DeserializeOwned,
{
    fn load(&self, key: &str) -> Option<T> {
        MemoryBackend::load(self, key)
    }

    fn save(&self, value: &T, key: &str) {
        MemoryBackend::save(self, value, key)
    }

    fn clear(&self, key: &str) {
        MemoryBackend::remove(self, key)
    }

    /// Isolation for this backend is per-instance, so the namespace
    /// argument carries no information and is ignored.
    fn clear_all(&self, _namespace: &Namespace) {
        MemoryBackend::clear_all(self)
    }
}
