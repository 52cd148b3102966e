//! Logical namespaces for cache isolation.
//!
//! Every durable backend is bound to exactly one namespace at construction,
//! so two backends with different namespaces can never observe each other's
//! entries. The namespace decides *where* entries live; it carries no other
//! behavior.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An immutable, named scope for cached entries.
///
/// # Design
///
/// A `Namespace` is a pure value: construction performs no I/O and cannot
/// fail. Identity is the name and nothing else, so two instances built from
/// the same string are fully interchangeable as map keys, set members, and
/// backend bindings.
///
/// # Example
///
/// ```ignore
/// let sessions = Namespace::new("sessions");
/// assert_eq!(sessions, Namespace::new("sessions"));
/// assert_eq!(sessions.name(), "sessions");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Namespace {
    /// Private name - read through `name()`, never mutated.
    name: String,
}

impl Namespace {
    /// Create a namespace with the given name.
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    /// The name this namespace was created with.
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Namespace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}


#[cfg(test)]
mod prop_tests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: equality tracks the name and nothing else.
        #[test]
        fn prop_equality_follows_name(a in any::<String>(), b in any::<String>()) {
            let na = Namespace::new(a.clone());
            let nb = Namespace::new(b.clone());
            prop_assert_eq!(na == nb, a == b);
        }

        /// Property: Display round-trips the original name exactly.
        #[test]
        fn prop_display_roundtrip(name in any::<String>()) {
            let ns = Namespace::new(name.clone());
            prop_assert_eq!(format!("{}", ns), name);
        }
    }
}
