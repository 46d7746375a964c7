//! Entry validation
//!
//! Some packaging tools leave junk behind in archives (`__MACOSX/`, `._Foo.class`
//! resource forks and the like). Those entries are not real compiled units and
//! must not take part in collision detection.

/// Suffix of compiled units inside an archive
pub const CLASS_SUFFIX: &str = ".class";

/// Whether an entry name ends with the compiled-unit suffix
#[must_use]
pub fn is_class_entry(name: &str) -> bool {
    name.ends_with(CLASS_SUFFIX)
}

/// Whether an archive entry path names a compiled unit worth tracking
///
/// Blank paths are rejected. Otherwise the final `/`-separated segment must
/// not start with `.` or `_`, and neither may the top-level directory
/// (`_MACOSX/`, `__MACOSX/`, `.git/`), whose whole subtree is packaging residue.
#[must_use]
pub fn is_trackable_entry(path: &str) -> bool {
    if path.trim().is_empty() {
        return false;
    }

    let name = path.rsplit_once('/').map_or(path, |(_, name)| name);
    if is_artifact_segment(name) {
        return false;
    }

    match path.split_once('/') {
        Some((top, _)) => !is_artifact_segment(top),
        None => true,
    }
}

fn is_artifact_segment(segment: &str) -> bool {
    segment.starts_with('.') || segment.starts_with('_')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trackable_plain_class() {
        assert!(is_trackable_entry("com/x/Y.class"));
        assert!(is_trackable_entry("Y.class"));
        assert!(is_trackable_entry("com/x/Y$Inner.class"));
    }

    #[test]
    fn test_rejects_hidden_segment() {
        assert!(!is_trackable_entry("a/b/.hidden"));
        assert!(!is_trackable_entry("com/x/._Y.class"));
        assert!(!is_trackable_entry(".Y.class"));
    }

    #[test]
    fn test_rejects_underscore_segment() {
        assert!(!is_trackable_entry("_MACOSX"));
        assert!(!is_trackable_entry("com/_Y.class"));
    }

    #[test]
    fn test_rejects_artifact_top_level_directory() {
        assert!(!is_trackable_entry("_MACOSX/x"));
        assert!(!is_trackable_entry("__MACOSX/com/x/Y.class"));
        assert!(!is_trackable_entry(".hidden/dir/Y.class"));
    }

    #[test]
    fn test_intermediate_segments_are_not_inspected() {
        assert!(is_trackable_entry("com/_internal/Y.class"));
        assert!(is_trackable_entry("com/.x/Y.class"));
    }

    #[test]
    fn test_rejects_blank() {
        assert!(!is_trackable_entry(""));
        assert!(!is_trackable_entry("   "));
        assert!(!is_trackable_entry("\t\n"));
    }

    #[test]
    fn test_trailing_slash_is_trackable() {
        // A directory entry has an empty final segment
        assert!(is_trackable_entry("com/x/"));
    }

    #[test]
    fn test_class_suffix() {
        assert!(is_class_entry("com/x/Y.class"));
        assert!(!is_class_entry("META-INF/MANIFEST.MF"));
        assert!(!is_class_entry("com/x/Y.classes"));
    }
}
