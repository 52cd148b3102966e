//! The cache contract and shared statistics.
//!
//! This module defines the trait every backend implements and the counters
//! each backend instance keeps about its own traffic.

use cubby_core::Namespace;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};

/// The uniform contract implemented by every cache backend.
///
/// This trait abstracts over storage with different durability and isolation
/// guarantees (on-disk files, a preference domain, process memory). Callers
/// that accept `&dyn CacheBackend<T>` or a generic `B: CacheBackend<T>` work
/// unchanged against any of them.
///
/// # Design
///
/// The value type is a parameter of the *trait*, not of each method. The
/// durable backends implement `CacheBackend<T>` for every serializable `T`;
/// the in-memory backend is bound to a single value type at construction and
/// implements the contract for exactly that type. Per-method type parameters
/// would make that single-type binding inexpressible.
///
/// # Failure Behavior
///
/// No operation returns an error and none may panic. An encode or decode
/// failure, like any storage I/O error, degrades to absence: `load` returns
/// `None` and the mutation becomes a no-op, with the cause reported through
/// `tracing` at `warn` level. Callers observe only "present" or "absent".
pub trait CacheBackend<T>: Send + Sync
where
    T: Serialize + DeserializeOwned,
{
    /// Get the decoded value stored under `key`, if any.
    ///
    /// Returns `None` when the key is absent and when a stored payload no
    /// longer decodes; the two cases are indistinguishable here.
    fn load(&self, key: &str) -> Option<T>;

    /// Encode `value` and store it under `key`, replacing any prior payload.
    ///
    /// If encoding fails the operation is a reported no-op and the prior
    /// payload, if any, is left intact.
    fn save(&self, value: &T, key: &str);

    /// Remove the entry under `key`. Silent no-op when the key is absent.
    fn clear(&self, key: &str);

    /// Remove every entry in `namespace`'s storage region in one operation.
    ///
    /// A region that does not exist is a reported no-op.
    fn clear_all(&self, namespace: &Namespace);
}

/// Statistics about cache usage.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    /// Number of loads that returned a value.
    pub hits: u64,
    /// Number of loads that returned nothing, including undecodable payloads.
    pub misses: u64,
    /// Number of payloads written.
    pub stores: u64,
}

impl CacheStats {
    /// Calculate the hit rate (0.0 to 1.0).
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Atomic counters behind each backend's `stats()`.
///
/// Plain relaxed counters: statistics never synchronize the data path.
#[derive(Debug, Default)]
pub(crate) struct StatCounters {
    hits: AtomicU64,
    misses: AtomicU64,
    stores: AtomicU64,
}

impl StatCounters {
    pub(crate) fn record_hit(&self) {
        self.hits.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_miss(&self) {
        self.misses.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn record_store(&self) {
        self.stores.fetch_add(1, Ordering::Relaxed);
    }

    pub(crate) fn snapshot(&self) -> CacheStats {
        CacheStats {
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
            stores: self.stores.load(Ordering::Relaxed),
        }
    }
}
