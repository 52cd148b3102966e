//! Cubby Storage - Pluggable Cache Backends
//!
//! One contract, three interchangeable backends:
//!
//! - [`FileBackend`] - one plain file per key under
//!   `<cache root>/<namespace>/<key>`
//! - [`PreferenceBackend`] - a preference domain named after the namespace,
//!   stored as a single JSON document
//! - [`MemoryBackend`] - a volatile, type-bound map for the process lifetime
//!
//! Every backend speaks [`CacheBackend`]: load, save, clear one key, clear a
//! whole namespace. Values cross one serialization path ([`codec`]), and
//! per-item failures degrade to absence with a `tracing` report instead of
//! an error; only construction can fail.
//!
//! # Example
//!
//! ```ignore
//! use cubby_storage::{FileBackend, Namespace};
//! use serde::{Deserialize, Serialize};
//!
//! #[derive(Serialize, Deserialize)]
//! struct User {
//!     id: u64,
//!     name: String,
//! }
//!
//! let profile = Namespace::new("profile");
//! let cache = FileBackend::new(profile.clone())?;
//!
//! cache.save(&User { id: 1, name: "Ann".into() }, "user1");
//! let cached: Option<User> = cache.load("user1");
//!
//! cache.clear("user1");
//! cache.clear_all(&profile);
//! ```

pub mod codec;
pub mod file_backend;
pub mod memory_backend;
mod paths;
pub mod preference_backend;
pub mod traits;

pub use file_backend::FileBackend;
pub use memory_backend::MemoryBackend;
pub use preference_backend::{PreferenceBackend, PreferenceDomain};
pub use traits::{CacheBackend, CacheStats};

// Re-export the core surface so depending on cubby-storage alone suffices.
pub use cubby_core::{CacheDirs, CacheError, CacheResult, Namespace};
