//! Error types for cubby operations
//!
//! Only environment-setup problems surface as errors: a storage root that
//! cannot be resolved, or a directory that cannot be created when a backend
//! is constructed. Per-item failures (a value that will not encode, a file
//! that will not read) never produce a `CacheError`; backends degrade those
//! to absence and report them through the logging side-channel.

use std::path::PathBuf;
use thiserror::Error;

/// Environment and setup errors raised at backend construction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum CacheError {
    #[error("No OS cache directory is available; set CUBBY_CACHE_DIR to override")]
    CacheRootUnavailable,

    #[error("No OS preference directory is available; set CUBBY_PREFERENCE_DIR to override")]
    PreferenceRootUnavailable,

    #[error("Failed to create directory {path:?}: {reason}")]
    CreateDirectory { path: PathBuf, reason: String },

    #[error("Preference domain {domain} is unavailable: {reason}")]
    DomainUnavailable { domain: String, reason: String },
}

/// Result type alias for cubby operations.
pub type CacheResult<T> = Result<T, CacheError>;

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_error_display_root_unavailable() {
        let msg = format!("{}", CacheError::CacheRootUnavailable);
        assert!(msg.contains("cache directory"));
        assert!(msg.contains("CUBBY_CACHE_DIR"));
    }

    #[test]
    fn test_cache_error_display_preference_root_unavailable() {
        let msg = format!("{}", CacheError::PreferenceRootUnavailable);
        assert!(msg.contains("preference directory"));
        assert!(msg.contains("CUBBY_PREFERENCE_DIR"));
    }

    #[test]
    fn test_cache_error_display_create_directory() {
        let err = CacheError::CreateDirectory {
            path: PathBuf::from("/var/cache/cubby/session"),
            reason: "permission denied".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("Failed to create directory"));
        assert!(msg.contains("session"));
        assert!(msg.contains("permission denied"));
    }

    #[test]
    fn test_cache_error_display_domain_unavailable() {
        let err = CacheError::DomainUnavailable {
            domain: "settings".to_string(),
            reason: "read-only file system".to_string(),
        };
        let msg = format!("{}", err);
        assert!(msg.contains("settings"));
        assert!(msg.contains("read-only file system"));
    }
}
