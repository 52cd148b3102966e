//! Preference-domain cache: one JSON document per domain.
//!
//! The OS preference store is modeled as named domains under the preference
//! root. A domain is a single JSON document at
//! `<preference root>/<domain>.json` mapping keys to base64 payload strings;
//! base64 keeps the opaque payload bytes representable inside the document.
//!
//! [`PreferenceDomain`] is the storage collaborator: string-keyed get, set,
//! remove, remove-all, and a raw dump. [`PreferenceBackend`] funnels the
//! cache contract through one domain, named after its namespace.
//!
//! # Durability
//!
//! Every mutation rewrites the whole document through a temp file and an
//! atomic rename, so a crashed writer never leaves a torn domain behind.
//! Each operation re-reads the document; nothing is cached across calls,
//! and coherence across processes is out of scope.

use crate::codec;
use crate::paths;
use crate::traits::{CacheBackend, CacheStats, StatCounters};
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use cubby_core::{CacheDirs, CacheError, CacheResult, Namespace};
use serde::{de::DeserializeOwned, Serialize};
use std::collections::HashMap;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::{debug, warn};

/// Name of the process-wide fallback domain.
///
/// A namespace literally called "default" shares this domain.
const DEFAULT_DOMAIN: &str = "default";

/// Counter distinguishing concurrent temp files within one process.
static NEXT_TEMP_ID: AtomicU64 = AtomicU64::new(0);

/// The document file for a domain name under a preference root.
fn domain_path(root: &Path, name: &str) -> PathBuf {
    root.join(format!("{}.json", paths::segment(name)))
}

/// Write `bytes` to `path` and flush them to disk before returning.
fn write_and_sync(path: &Path, bytes: &[u8]) -> std::io::Result<()> {
    let mut file = std::fs::File::create(path)?;
    file.write_all(bytes)?;
    file.sync_all()
}

/// A named key-value domain inside the preference store.
///
/// Raw payload bytes in, raw payload bytes out; the cache codec is layered
/// on top by [`PreferenceBackend`]. A missing document reads as an empty
/// domain, and a malformed document is reported and treated as empty rather
/// than raised.
#[derive(Debug, Clone)]
pub struct PreferenceDomain {
    name: String,
    root: PathBuf,
    path: PathBuf,
}

impl PreferenceDomain {
    /// Open (or create the location for) the domain `name` under `root`.
    ///
    /// # Errors
    ///
    /// Returns `CacheError::CreateDirectory` if `root` cannot be created,
    /// or `CacheError::DomainUnavailable` if something other than a regular
    /// file occupies the domain's document path.
    pub fn open(root: impl AsRef<Path>, name: &str) -> CacheResult<Self> {
        let root = root.as_ref().to_path_buf();
        std::fs::create_dir_all(&root).map_err(|e| CacheError::CreateDirectory {
            path: root.clone(),
            reason: e.to_string(),
        })?;

        let path = domain_path(&root, name);
        if path.exists() && !path.is_file() {
            return Err(CacheError::DomainUnavailable {
                domain: name.to_string(),
                reason: "domain path is not a regular file".to_string(),
            });
        }

        Ok(Self {
            name: name.to_string(),
            root,
            path,
        })
    }

    /// The domain's name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The preference root this domain lives under.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The domain's document file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw payload bytes stored under `key`, if any.
    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        let doc = self.read_document();
        let encoded = doc.get(key)?;
        match STANDARD.decode(encoded) {
            Ok(bytes) => Some(bytes),
            Err(e) => {
                warn!("Entry {:?} in domain {} is not valid base64: {}", key, self.name, e);
                None
            }
        }
    }

    /// Store raw payload bytes under `key`, replacing any prior entry.
    ///
    /// Returns whether the document was written.
    pub fn set(&self, key: &str, bytes: &[u8]) -> bool {
        let mut doc = self.read_document();
        doc.insert(key.to_string(), STANDARD.encode(bytes));
        self.write_document(&doc)
    }

    /// Remove the entry under `key`.
    ///
    /// Returns whether an entry was present and the document was written.
    pub fn remove(&self, key: &str) -> bool {
        let mut doc = self.read_document();
        if doc.remove(key).is_none() {
            return false;
        }
        self.write_document(&doc)
    }

    /// Whether an entry is present under `key`.
    pub fn contains(&self, key: &str) -> bool {
        self.read_document().contains_key(key)
    }

    /// Every key and its raw payload bytes.
    ///
    /// Entries whose stored form is not valid base64 are reported and
    /// skipped.
    pub fn values(&self) -> HashMap<String, Vec<u8>> {
        self.read_document()
            .into_iter()
            .filter_map(|(key, encoded)| match STANDARD.decode(&encoded) {
                Ok(bytes) => Some((key, bytes)),
                Err(e) => {
                    warn!("Skipping entry {:?} in domain {}: {}", key, self.name, e);
                    None
                }
            })
            .collect()
    }

    fn read_document(&self) -> HashMap<String, String> {
        let bytes = match std::fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return HashMap::new(),
            Err(e) => {
                warn!("Failed to read preference domain {:?}: {}", self.path, e);
                return HashMap::new();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(doc) => doc,
            Err(e) => {
                warn!(
                    "Preference domain {:?} is malformed, treating as empty: {}",
                    self.path, e
                );
                HashMap::new()
            }
        }
    }

    /// Write the document through a temp file and an atomic rename.
    fn write_document(&self, doc: &HashMap<String, String>) -> bool {
        let json = match serde_json::to_vec_pretty(doc) {
            Ok(json) => json,
            Err(e) => {
                warn!("Failed to serialize preference domain {}: {}", self.name, e);
                return false;
            }
        };

        let temp_path = self.path.with_extension(format!(
            "json.{}.{}.tmp",
            std::process::id(),
            NEXT_TEMP_ID.fetch_add(1, Ordering::Relaxed)
        ));

        let written = write_and_sync(&temp_path, &json)
            .and_then(|_| std::fs::rename(&temp_path, &self.path));
        match written {
            Ok(()) => {
                debug!("Wrote preference domain {:?}", self.path);
                true
            }
            Err(e) => {
                warn!("Failed to write preference domain {:?}: {}", self.path, e);
                let _ = std::fs::remove_file(&temp_path);
                false
            }
        }
    }
}

/// Durable cache backend over a preference domain.
///
/// The domain is named after the backend's namespace. If that domain cannot
/// be opened, construction falls back to the process-wide default domain
/// with a reported warning, matching the behavior of preference stores that
/// always have a standard domain available.
///
/// # Example
///
/// ```ignore
/// use cubby_storage::{Namespace, PreferenceBackend};
///
/// let backend = PreferenceBackend::new(Namespace::new("settings"))?;
/// backend.save(&theme, "theme");
/// let cached: Option<Theme> = backend.load("theme");
/// ```
pub struct PreferenceBackend {
    /// Preference root shared by all domains.
    root: PathBuf,
    domain: PreferenceDomain,
    namespace: Namespace,
    stats: StatCounters,
}

impl PreferenceBackend {
    /// Create a backend for `namespace` under the environment-resolved
    /// preference root.
    ///
    /// # Errors
    ///
    /// Returns an error if the preference root cannot be resolved, or if
    /// neither the namespace's domain nor the default domain can be opened.
    pub fn new(namespace: Namespace) -> CacheResult<Self> {
        let dirs = CacheDirs::from_env()?;
        Self::with_root(dirs.preference_root(), namespace)
    }

    /// Create a backend for `namespace` under an explicit root.
    ///
    /// # Errors
    ///
    /// Same conditions as [`PreferenceBackend::new`], minus root resolution.
    pub fn with_root(root: impl AsRef<Path>, namespace: Namespace) -> CacheResult<Self> {
        let root = root.as_ref();
        let domain = match PreferenceDomain::open(root, namespace.name()) {
            Ok(domain) => domain,
            Err(e) => {
                warn!(
                    "Falling back to the default preference domain for namespace {}: {}",
                    namespace, e
                );
                PreferenceDomain::open(root, DEFAULT_DOMAIN)?
            }
        };
        Ok(Self::from_domain(domain, namespace))
    }

    /// Create a backend over an explicitly provided domain.
    ///
    /// The injection point for tests and for callers that manage domains
    /// themselves; no fallback applies.
    pub fn from_domain(domain: PreferenceDomain, namespace: Namespace) -> Self {
        debug!(
            "Opened preference cache for namespace {} in domain {}",
            namespace,
            domain.name()
        );
        Self {
            root: domain.root().to_path_buf(),
            domain,
            namespace,
            stats: StatCounters::default(),
        }
    }

    /// The namespace this backend was constructed for.
    pub fn namespace(&self) -> &Namespace {
        &self.namespace
    }

    /// The domain this backend reads and writes.
    ///
    /// After a construction fallback this is the default domain, not the
    /// namespace-named one.
    pub fn domain(&self) -> &PreferenceDomain {
        &self.domain
    }

    /// Get the decoded value stored under `key`, if any.
    pub fn load<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let bytes = match self.domain.get(key) {
            Some(bytes) => bytes,
            None => {
                self.stats.record_miss();
                debug!("Cache miss for {:?} in domain {}", key, self.domain.name());
                return None;
            }
        };

        match codec::decode(&bytes) {
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
    pub fn save<T: Serialize>(&self, value: &T, key: &str) {
        let Some(bytes) = codec::encode(value) else {
            return;
        };
        if self.domain.set(key, &bytes) {
            self.stats.record_store();
        }
    }

    /// Remove the entry under `key`. No-op when the key is absent.
    pub fn clear(&self, key: &str) {
        // Presence check first, carried over from the backend contract.
        if self.domain.contains(key) {
            self.domain.remove(key);
        }
    }

    /// Remove `namespace`'s entire domain document under this backend's
    /// root.
    pub fn clear_all(&self, namespace: &Namespace) {
        let path = domain_path(&self.root, namespace.name());
        if !path.exists() {
            debug!("Preference domain {:?} already absent", path);
            return;
        }
        if let Err(e) = std::fs::remove_file(&path) {
            warn!("Failed to remove preference domain {:?}: {}", path, e);
        }
    }

    /// Raw dump of every payload in this backend's domain, bypassing the
    /// codec. Diagnostics only.
    pub fn all_values(&self) -> HashMap<String, Vec<u8>> {
        self.domain.values()
    }

    /// Whether an entry is present under `key`. Does not count as a hit
    /// or miss.
    pub fn contains(&self, key: &str) -> bool {
        self.domain.contains(key)
    }

    /// Snapshot of this backend's hit/miss/store counters.
    pub fn stats(&self) -> CacheStats {
        self.stats.snapshot()
    }
}

impl<T> CacheBackend<T> for PreferenceBackend
where
    T: Serialize + DeserializeOwned,
{
    fn load(&self, key: &str) -> Option<T> {
        PreferenceBackend::load(self, key)
    }

    fn save(&self, value: &T, key: &str) {
        PreferenceBackend::save(self, value, key)
    }

    fn clear(&self, key: &str) {
        PreferenceBackend::clear(self, key)
    }

    fn clear_all(&self, namespace: &Namespace) {
        PreferenceBackend::clear_all(self, namespace)
    }
}
