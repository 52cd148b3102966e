//! Storage-root resolution.
//!
//! Backends never hardcode where they live. The cache root (file-backed
//! entries) and the preference root (preference domains) are resolved once,
//! either from the OS-provided user directories or from environment
//! overrides, and injected into backends at construction.

use crate::error::{CacheError, CacheResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Vendor directory appended to the OS-provided roots.
///
/// Desktop platforms share one cache directory across every application, so
/// cubby scopes itself under `cubby/` instead of writing namespace
/// directories into the shared root directly.
const VENDOR_DIR: &str = "cubby";

/// The resolved on-disk roots for the durable backends.
///
/// File-backed entries live under `cache_root()`, preference domains under
/// `preference_root()`. Layout below each root is owned by the backends.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheDirs {
    cache_root: PathBuf,
    preference_root: PathBuf,
}

impl CacheDirs {
    /// Resolve both roots from the environment.
    ///
    /// Environment variables:
    /// - `CUBBY_CACHE_DIR`: overrides the cache root (default: the OS user
    ///   cache directory plus `cubby/`)
    /// - `CUBBY_PREFERENCE_DIR`: overrides the preference root (default: the
    ///   OS user preference directory plus `cubby/`)
    ///
    /// # Errors
    ///
    /// Returns `CacheError::CacheRootUnavailable` or
    /// `CacheError::PreferenceRootUnavailable` when a root has no override
    /// and the OS provides no user directory for it (for example a process
    /// with no home directory).
    pub fn from_env() -> CacheResult<Self> {
        let cache_root = match env_path("CUBBY_CACHE_DIR") {
            Some(dir) => dir,
            None => dirs::cache_dir()
                .map(|d| d.join(VENDOR_DIR))
                .ok_or(CacheError::CacheRootUnavailable)?,
        };

        let preference_root = match env_path("CUBBY_PREFERENCE_DIR") {
            Some(dir) => dir,
            None => dirs::preference_dir()
                .map(|d| d.join(VENDOR_DIR))
                .ok_or(CacheError::PreferenceRootUnavailable)?,
        };

        Ok(Self {
            cache_root,
            preference_root,
        })
    }

    /// Build from explicit roots, bypassing environment resolution.
    pub fn with_roots(cache_root: impl Into<PathBuf>, preference_root: impl Into<PathBuf>) -> Self {
        Self {
            cache_root: cache_root.into(),
            preference_root: preference_root.into(),
        }
    }

    /// Root directory for file-backed cache namespaces.
    pub fn cache_root(&self) -> &Path {
        &self.cache_root
    }

    /// Root directory for preference domain documents.
    pub fn preference_root(&self) -> &Path {
        &self.preference_root
    }
}

/// Read an environment variable as a path, treating unset and empty alike.
fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var(var)
        .ok()
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_roots_accessors() {
        let dirs = CacheDirs::with_roots("/tmp/cubby-cache", "/tmp/cubby-prefs");
        assert_eq!(dirs.cache_root(), Path::new("/tmp/cubby-cache"));
        assert_eq!(dirs.preference_root(), Path::new("/tmp/cubby-prefs"));
    }

    #[test]
    fn test_from_env_honors_overrides() {
        // The only test in this crate that touches process environment, so
        // parallel test threads never observe a partially-set state.
        let cache = tempfile::tempdir().expect("tempdir should succeed");
        let prefs = tempfile::tempdir().expect("tempdir should succeed");

        std::env::set_var("CUBBY_CACHE_DIR", cache.path());
        std::env::set_var("CUBBY_PREFERENCE_DIR", prefs.path());

        let dirs = CacheDirs::from_env().expect("from_env should succeed");
        assert_eq!(dirs.cache_root(), cache.path());
        assert_eq!(dirs.preference_root(), prefs.path());

        std::env::remove_var("CUBBY_CACHE_DIR");
        std::env::remove_var("CUBBY_PREFERENCE_DIR");
    }

    #[test]
    fn test_env_path_empty_is_none() {
        // Unset is indistinguishable from empty.
        assert_eq!(env_path("CUBBY_NO_SUCH_VARIABLE_SET"), None);
    }
}
