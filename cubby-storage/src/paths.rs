//! Mapping namespace names and keys onto file-name segments.

/// Turn a caller-supplied name into a single safe path segment.
///
/// Path separators and the Windows drive separator are replaced so a name
/// can never traverse out of its directory. Empty and dot names map to a
/// placeholder so a segment can never alias the directory itself or its
/// parent; without this an empty namespace name would resolve to the cache
/// root and `clear_all` would delete it.
///
/// Distinct names can sanitize to the same segment (`"a/b"` and `"a-b"`)
/// and then share storage. Keys are identifiers chosen by the caller, so
/// collisions are theirs to avoid.
pub(crate) fn segment(name: &str) -> String {
    match name {
        "" | "." | ".." => "_".to_string(),
        _ => name.replace(['/', '\\', ':'], "-"),
    }
}
