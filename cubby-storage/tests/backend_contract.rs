//! Integration tests for the shared cache contract
//!
//! Tests verify:
//! - Every backend satisfies the same load/save/clear/clear_all behavior
//! - Overwrites win, absent keys are silent, clear is idempotent
//! - clear_all wipes a namespace region and the backend accepts saves again
//! - The namespace argument to clear_all is honored, not assumed
//! - Backends are usable as trait objects
//! - Different backends and namespaces never observe each other

use cubby_storage::{CacheBackend, FileBackend, MemoryBackend, Namespace, PreferenceBackend};
use serde::{Deserialize, Serialize};
use tempfile::TempDir;

// ============================================================================
// TEST FIXTURES
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct User {
    id: u64,
    name: String,
}

fn make_user(id: u64, name: &str) -> User {
    User {
        id,
        name: name.to_string(),
    }
}

// ============================================================================
// SHARED CONTRACT DRIVER
// ============================================================================

/// Drive one backend through the whole contract.
fn exercise_contract<B: CacheBackend<User>>(backend: &B, namespace: &Namespace) {
    // Empty start.
    assert!(backend.load("user1").is_none());

    // Round trip.
    backend.save(&make_user(1, "Ann"), "user1");
    assert_eq!(backend.load("user1"), Some(make_user(1, "Ann")));

    // Overwrite: the second save wins.
    backend.save(&make_user(1, "Anna"), "user1");
    assert_eq!(backend.load("user1"), Some(make_user(1, "Anna")));

    // Clearing one key leaves the others.
    backend.save(&make_user(2, "Ben"), "user2");
    backend.clear("user1");
    assert!(backend.load("user1").is_none());
    assert_eq!(backend.load("user2"), Some(make_user(2, "Ben")));

    // Clear is idempotent, including on keys never saved.
    backend.clear("user1");
    backend.clear("never-saved");

    // clear_all wipes the namespace region.
    backend.save(&make_user(3, "Cal"), "user3");
    backend.clear_all(namespace);
    assert!(backend.load("user2").is_none());
    assert!(backend.load("user3").is_none());

    // The backend keeps working after a full wipe.
    backend.save(&make_user(4, "Dee"), "user4");
    assert_eq!(backend.load("user4"), Some(make_user(4, "Dee")));
}

#[test]
fn test_file_backend_satisfies_contract() {
    let root = TempDir::new().expect("TempDir creation should succeed");
    let namespace = Namespace::new("users");
    let backend = FileBackend::with_root(root.path(), namespace.clone())
        .expect("backend creation should succeed");
    exercise_contract(&backend, &namespace);
}

#[test]
fn test_preference_backend_satisfies_contract() {
    let root = TempDir::new().expect("TempDir creation should succeed");
    let namespace = Namespace::new("users");
    let backend = PreferenceBackend::with_root(root.path(), namespace.clone())
        .expect("backend creation should succeed");
    exercise_contract(&backend, &namespace);
}

#[test]
fn test_memory_backend_satisfies_contract() {
    let namespace = Namespace::new("users");
    let backend: MemoryBackend<User> = MemoryBackend::new();
    exercise_contract(&backend, &namespace);
}

// ============================================================================
// TRAIT OBJECT USE
// ============================================================================

#[test]
fn test_backends_as_trait_objects() {
    let file_root = TempDir::new().expect("TempDir creation should succeed");
    let pref_root = TempDir::new().expect("TempDir creation should succeed");
    let namespace = Namespace::new("mixed");

    let backends: Vec<Box<dyn CacheBackend<User>>> = vec![
        Box::new(
            FileBackend::with_root(file_root.path(), namespace.clone())
                .expect("backend creation should succeed"),
        ),
        Box::new(
            PreferenceBackend::with_root(pref_root.path(), namespace.clone())
                .expect("backend creation should succeed"),
        ),
        Box::new(MemoryBackend::<User>::new()),
    ];

    for (i, backend) in backends.iter().enumerate() {
        let key = format!("user{}", i);
        backend.save(&make_user(i as u64, "Gen"), &key);
        assert_eq!(backend.load(&key), Some(make_user(i as u64, "Gen")));
    }
}

// ============================================================================
// NAMESPACE AND MEDIA ISOLATION
// ============================================================================

#[test]
fn test_backends_use_independent_storage() {
    let file_root = TempDir::new().expect("TempDir creation should succeed");
    let pref_root = TempDir::new().expect("TempDir creation should succeed");
    let namespace = Namespace::new("profile");

    let file = FileBackend::with_root(file_root.path(), namespace.clone())
        .expect("backend creation should succeed");
    let prefs = PreferenceBackend::with_root(pref_root.path(), namespace.clone())
        .expect("backend creation should succeed");
    let memory: MemoryBackend<User> = MemoryBackend::new();

    file.save(&make_user(1, "Ann"), "user1");

    // Same namespace name, same key: the other media stay empty.
    let from_prefs: Option<User> = prefs.load("user1");
    assert!(from_prefs.is_none());
    assert!(memory.load("user1").is_none());
}

#[test]
fn test_clear_all_honors_namespace_argument() {
    let root = TempDir::new().expect("TempDir creation should succeed");
    let alpha = Namespace::new("alpha");
    let beta = Namespace::new("beta");

    let alpha_backend = FileBackend::with_root(root.path(), alpha.clone())
        .expect("backend creation should succeed");
    let beta_backend = FileBackend::with_root(root.path(), beta.clone())
        .expect("backend creation should succeed");

    alpha_backend.save(&make_user(1, "Ann"), "user1");
    beta_backend.save(&make_user(2, "Ben"), "user1");

    // Wiping beta through alpha's backend removes beta's region only.
    alpha_backend.clear_all(&beta);

    let beta_entry: Option<User> = beta_backend.load("user1");
    assert!(beta_entry.is_none(), "beta's region should be gone");
    let alpha_entry: Option<User> = alpha_backend.load("user1");
    assert!(alpha_entry.is_some(), "alpha's region should be untouched");
}

// ============================================================================
// END-TO-END SCENARIO
// ============================================================================

#[test]
fn test_profile_scenario() {
    let root = TempDir::new().expect("TempDir creation should succeed");
    let profile = Namespace::new("profile");
    let cache = FileBackend::with_root(root.path(), profile.clone())
        .expect("backend creation should succeed");

    // Store and read back a profile entry.
    cache.save(&make_user(1, "Ann"), "user1");
    let cached: Option<User> = cache.load("user1");
    assert_eq!(cached, Some(make_user(1, "Ann")));

    // Clear the entry and observe absence.
    cache.clear("user1");
    let cleared: Option<User> = cache.load("user1");
    assert!(cleared.is_none());

    // Wipe the namespace; its directory disappears entirely.
    cache.save(&make_user(1, "Ann"), "user1");
    cache.clear_all(&profile);
    assert!(!root.path().join("profile").exists());
}
