//! Archive enumeration
//!
//! Opens one zip container and yields the names of its compiled-unit entries.
//! The open file lives inside [`ClassEntries`] and is closed as soon as the
//! iterator is dropped.

use crate::entry::is_class_entry;
use crate::error::{ScanError, ScanResult};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use zip::ZipArchive;

/// Default archive extension
pub const DEFAULT_ARCHIVE_EXTENSION: &str = ".jar";

/// Decides whether a resolved file is an archive worth scanning
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveMatcher {
    extension: String,
}

impl Default for ArchiveMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_ARCHIVE_EXTENSION)
    }
}

impl ArchiveMatcher {
    /// Match files ending with `extension`; a missing leading dot is added
    pub fn new(extension: impl Into<String>) -> Self {
        let extension = extension.into();
        let extension = if extension.starts_with('.') {
            extension
        } else {
            format!(".{extension}")
        };
        Self { extension }
    }

    #[must_use]
    pub fn extension(&self) -> &str {
        &self.extension
    }

    /// Case-sensitive suffix match on the full path
    #[must_use]
    pub fn matches(&self, path: &Path) -> bool {
        path.to_string_lossy().ends_with(&self.extension)
    }
}

/// Lazy iterator over the class entries of one archive
pub struct ClassEntries {
    path: PathBuf,
    archive: ZipArchive<BufReader<File>>,
    len: usize,
    next: usize,
}

impl std::fmt::Debug for ClassEntries {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ClassEntries")
            .field("path", &self.path)
            .field("len", &self.len)
            .field("next", &self.next)
            .finish_non_exhaustive()
    }
}

impl ClassEntries {
    /// Path of the archive being enumerated
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Total number of entries in the archive, class or not
    #[must_use]
    pub fn total_entries(&self) -> usize {
        self.len
    }
}

impl Iterator for ClassEntries {
    type Item = ScanResult<String>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.next < self.len {
            let index = self.next;
            self.next += 1;

            match self.archive.by_index_raw(index) {
                Ok(file) => {
                    if is_class_entry(file.name()) {
                        return Some(Ok(file.name().to_string()));
                    }
                }
                Err(e) => {
                    // A broken central directory entry poisons the rest
                    self.next = self.len;
                    return Some(Err(ScanError::unreadable(self.path.clone(), e)));
                }
            }
        }
        None
    }
}

/// Open an archive and enumerate its class entries lazily
///
/// Re-opening the same archive yields the same sequence.
///
/// # Errors
/// Returns [`ScanError::ArchiveUnreadable`] if the file cannot be opened or
/// is not a valid zip container
pub fn scan_entries(path: &Path) -> ScanResult<ClassEntries> {
    let file = File::open(path).map_err(|e| ScanError::unreadable(path, e))?;
    let archive =
        ZipArchive::new(BufReader::new(file)).map_err(|e| ScanError::unreadable(path, e))?;
    let len = archive.len();

    Ok(ClassEntries {
        path: path.to_path_buf(),
        archive,
        len,
        next: 0,
    })
}

/// Enumerate all class entries of an archive, closing it before returning
///
/// # Errors
/// Returns [`ScanError::ArchiveUnreadable`] if the archive cannot be opened
/// or an entry header is corrupt
pub fn read_class_entries(path: &Path) -> ScanResult<Vec<String>> {
    scan_entries(path)?.collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::TempDir;
    use zip::write::FileOptions;
    use zip::ZipWriter;

    fn write_archive(dir: &Path, name: &str, entries: &[&str]) -> PathBuf {
        let path = dir.join(name);
        let mut zip = ZipWriter::new(File::create(&path).unwrap());
        for entry in entries {
            zip.start_file(*entry, FileOptions::default()).unwrap();
            zip.write_all(b"\xca\xfe\xba\xbe").unwrap();
        }
        zip.finish().unwrap();
        path
    }

    #[test]
    fn test_matcher_default_extension() {
        let matcher = ArchiveMatcher::default();
        assert!(matcher.matches(Path::new("/r/a.jar")));
        assert!(!matcher.matches(Path::new("/r/a.pom")));
        assert!(!matcher.matches(Path::new("/r/a.JAR")));
    }

    #[test]
    fn test_matcher_adds_leading_dot() {
        let matcher = ArchiveMatcher::new("war");
        assert_eq!(matcher.extension(), ".war");
        assert!(matcher.matches(Path::new("/r/app.war")));
        assert!(!matcher.matches(Path::new("/r/software")));
    }

    #[test]
    fn test_scan_yields_only_class_entries() {
        let dir = TempDir::new().unwrap();
        let path = write_archive(
            dir.path(),
            "a.jar",
            &["META-INF/MANIFEST.MF", "com/x/Y.class", "com/x/y.properties", "Z.class"],
        );

        let entries = read_class_entries(&path).unwrap();
        assert_eq!(entries, vec!["com/x/Y.class", "Z.class"]);
    }

    #[test]
    fn test_scan_keeps_artifact_entries_for_caller() {
        let dir = TempDir::new().unwrap();
        let path = write_archive(dir.path(), "a.jar", &["__MACOSX/com/._Y.class", "com/Y.class"]);

        let entries = read_class_entries(&path).unwrap();
        assert_eq!(entries.len(), 2);
    }

    #[test]
    fn test_scan_is_restartable() {
        let dir = TempDir::new().unwrap();
        let path = write_archive(dir.path(), "a.jar", &["A.class", "B.class"]);

        let first = read_class_entries(&path).unwrap();
        let second = read_class_entries(&path).unwrap();
        assert_eq!(first, second);

        let entries = scan_entries(&path).unwrap();
        assert_eq!(entries.total_entries(), 2);
    }

    #[test]
    fn test_missing_archive_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let err = scan_entries(&dir.path().join("missing.jar")).unwrap_err();
        assert_eq!(err.code(), "ARCHIVE_UNREADABLE");
    }

    #[test]
    fn test_corrupt_local_header_stops_enumeration() {
        let dir = TempDir::new().unwrap();
        let path = write_archive(dir.path(), "a.jar", &["A.class", "B.class"]);
        // The central directory stays intact; the first local header does not
        let mut bytes = std::fs::read(&path).unwrap();
        bytes[..4].copy_from_slice(b"XXXX");
        std::fs::write(&path, bytes).unwrap();

        let mut entries = scan_entries(&path).unwrap();
        assert_eq!(entries.total_entries(), 2);
        assert!(matches!(
            entries.next(),
            Some(Err(ScanError::ArchiveUnreadable { .. }))
        ));
        assert!(entries.next().is_none());

        let err = read_class_entries(&path).unwrap_err();
        assert_eq!(err.code(), "ARCHIVE_UNREADABLE");
    }

    #[test]
    fn test_corrupt_archive_is_unreadable() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("broken.jar");
        std::fs::write(&path, b"definitely not a zip file").unwrap();

        let err = read_class_entries(&path).unwrap_err();
        assert!(matches!(err, ScanError::ArchiveUnreadable { .. }));
        assert!(err.is_per_archive());
    }
}
