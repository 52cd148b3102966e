//! Cubby Core - Shared Types for the Cubby Cache Backends
//!
//! Defines the values every backend agrees on: the `Namespace` scope, the
//! `CacheError`/`CacheResult` environment-failure surface, and `CacheDirs`
//! storage-root resolution. The backends themselves live in cubby-storage.

pub mod config;
pub mod error;
pub mod namespace;

pub use config::CacheDirs;
pub use error::{CacheError, CacheResult};
pub use namespace::Namespace;
