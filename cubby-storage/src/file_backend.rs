//! File-backed cache: one plain file per key.
//!
//! Entries live at `<cache root>/<namespace>/<key>` with the encoded payload
//! as the entire file contents, no header or sidecar metadata, so an entry
//! can be read or deleted with ordinary shell tools.
//!
//! # Failure Behavior
//!
//! Creating the namespace directory is the only fatal step and happens at
//! construction. After that every read, write, and remove degrades to
//! absence or a no-op on failure, reported at `warn` level.
//!
//! # Thread Safety
//!
//! None beyond what the file system provides. Concurrent writers to the same
//! key race and the last write wins; cross-process locking is out of scope.

use crate::codec;
use crate::paths;
use crate::traits::{CacheBackend, CacheStats, StatCounters};
use cubby_core::{CacheDirs, CacheError, CacheResult, Namespace};
use serde::{de::DeserializeOwned, Serialize};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Durable cache backend storing one file per key.
///
/// # Example
///
/// ```ignore
/// use cubby_storage::{FileBackend, Namespace};
///
/// let backend = FileBackend::new(Namespace::new("profile"))?;
/// backend.save(&user, "user1");
/// let cached: Option<User> = backend.load("user1");
/// ```
pub struct FileBackend {
    /// Cache root shared by all namespaces.
    root: PathBuf,
    /// This namespace's directory under the root.
    dir: PathBuf,
    namespace: Namespace,
    stats: StatCounters,
}

impl FileBackend {
    /// Create a backend for `namespace` under the environment-resolved
    /// cache root.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache root cannot be resolved or the
    /// namespace directory cannot be created. An unwritable cache location
    /// is an environment problem, so it surfaces here instead of degrading
    /// every later operation.
    pub fn new(namespace: Namespace) -> CacheResult<Self> {
        let dirs = CacheDirs::from_env()?;
        Self::with_root(dirs.cache_root(), namespace)
    }

    /// Create a backend for `namespace` under an explicit root.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::CreateDirectory` if the namespace directory
    /// cannot be created.
    pub fn with_root(root: impl AsRef<Path>, namespace: Namespace) -> CacheResult<Self> {
        let root = root.as_ref().to_path_buf();
        let dir = root.join(paths::segment(namespace.name()));

        std::fs::create_dir_all(&dir).map_err(|e| CacheError::CreateDirectory {
            path: dir.clone(),
            reason: e.to_string(),
        })?;

        debug!("Opened file cache for namespace {} at {:?}", namespace, dir);
        Ok(Self {
            root,
            dir,
            namespace,
            stats: StatCounters::default(),
        })
    }

    /// The namespace this backend was constructed for.
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// The directory holding this namespace's entries.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn entry_path(&self, key: &str) -> PathBuf {
        self.dir.join(paths::segment(key))
    }

    /// Get the decoded value stored under `key`, if any.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let path = self.entry_path(key);
        let bytes = match std::fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                self.stats.record_miss();
                debug!("Cache miss for {:?}", path);
                return None;
            }
            Err(e) => {
                self.stats.record_miss();
                warn!("Failed to read cache entry {:?}: {}", path, e);
                return None;
            }
        };

        match codec::decode(&bytes) {
            Some(value) => {
                self.stats.record_hit();
                Some(value)
            }
            None => {
                // Undecodable counts as a miss; codec already reported it.
                self.stats.record_miss();
                None
            }
        }
    }

    /// Encode `value` and write it under `key`, replacing any prior entry.
    pub fn save<T: Serialize>(&self, value: &T, key: &str) {
        let Some(bytes) = codec::encode(value) else {
            // Encode failure is already reported; the prior entry survives.
            return;
        };

        if !self.dir.exists() {
            // clear_all removes the whole directory; restore it on demand.
            if let Err(e) = std::fs::create_dir_all(&self.dir) {
                warn!("Failed to recreate cache directory {:?}: {}", self.dir, e);
                return;
            }
        }

        let path = self.entry_path(key);
        match std::fs::write(&path, &bytes) {
            Ok(()) => {
                self.stats.record_store();
                debug!("Stored {} bytes at {:?}", bytes.len(), path);
            }
            Err(e) => warn!("Failed to write cache entry {:?}: {}", path, e),
        }
    }

    /// Remove the entry under `key`. No-op when the key is absent.
    pub fn clear(&self, key: &str) {
        let path = self.entry_path(key);
        if !path.exists() {
            return;
        }
        if let Err(e) = std::fs::remove_file(&path) {
            warn!("Failed to remove cache entry {:?}: {}", path, e);
        }
    }

    /// Remove `namespace`'s entire directory under this backend's root.
    pub fn clear_all(&self, namespace: &Namespace) {
        let dir = self.root.join(paths::segment(namespace.name()));
        if !dir.exists() {
            debug!("Namespace directory {:?} already absent", dir);
            return;
        }
        if let Err(e) = std::fs::remove_dir_all(&dir) {
            warn!("Failed to remove namespace directory {:?}: {}", dir, e);
        }
    }

    /// Whether an entry is present under `key`. Does not count as a hit
    /// or miss.
    pub fn contains(&self, key: &str) -> bool {
        self.entry_path(key).is_file()
    }

    /// Snapshot of this backend's hit/miss/store counters.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }
}

impl<T> CacheBackend<T> for FileBackend
where
    T: Serialize + DeserializeOwned,
{
    fn load(&self, key: &str) -> Option<T> {
        FileBackend::load(self, key)
    }

    fn save(&self, value: &T, key: &str) {
        FileBackend::save(self, value, key)
    }

    fn clear(&self, key: &str) {
        FileBackend::clear(self, key)
    }

    fn clear_all(&self, namespace: &Namespace) {
        FileBackend::clear_all(self, namespace)
    }
}
