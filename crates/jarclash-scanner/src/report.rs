//! Scan report types

use crate::collision::{CollisionGroup, CollisionRecord};
use crate::types::Dependency;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Outcome of one scanner run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanReport {
    /// When the run started
    pub scanned_at: DateTime<Utc>,
    /// Archives whose entries were checked
    pub archives_scanned: usize,
    /// Trackable class entries checked across all archives
    pub entries_checked: usize,
    /// Dependencies that were not scanned, and why
    #[serde(default)]
    pub skipped: Vec<SkippedArchive>,
    /// Collisions, grouped per archive pair, in scan order
    #[serde(default)]
    pub collisions: Vec<CollisionGroup>,
}

impl Default for ScanReport {
    fn default() -> Self {
        Self {
            scanned_at: Utc::now(),
            archives_scanned: 0,
            entries_checked: 0,
            skipped: Vec::new(),
            collisions: Vec::new(),
        }
    }
}

impl ScanReport {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Check if there are any collisions
    #[must_use]
    pub fn has_collisions(&self) -> bool {
        !self.collisions.is_empty()
    }

    /// Number of colliding archive pairs
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.collisions.len()
    }

    /// Number of colliding entries across all pairs
    #[must_use]
    pub fn entry_count(&self) -> usize {
        self.collisions.iter().map(|group| group.entries.len()).sum()
    }

    /// One record per archive pair, the first colliding entry of each
    #[must_use]
    pub fn records(&self) -> Vec<CollisionRecord> {
        self.collisions
            .iter()
            .filter_map(CollisionGroup::first_record)
            .collect()
    }

    /// Groups where the archive at `path` is on either side
    pub fn collisions_for<'a>(&'a self, path: &'a Path) -> impl Iterator<Item = &'a CollisionGroup> {
        self.collisions.iter().filter(move |group| group.involves(path))
    }

    /// Archives that could not be read
    pub fn unreadable(&self) -> impl Iterator<Item = &SkippedArchive> {
        self.skipped
            .iter()
            .filter(|skip| matches!(skip.reason, SkipReason::Unreadable { .. }))
    }

    /// Fold another run's results into this one
    pub fn merge(&mut self, other: ScanReport) {
        self.archives_scanned += other.archives_scanned;
        self.entries_checked += other.entries_checked;
        self.skipped.extend(other.skipped);
        self.collisions.extend(other.collisions);
    }
}

/// A dependency the scanner did not check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkippedArchive {
    /// Dependency identifier or file
    pub dependency: String,
    /// Resolved file, if any
    pub path: Option<PathBuf>,
    pub reason: SkipReason,
}

impl SkippedArchive {
    pub(crate) fn new(dependency: &Dependency, reason: SkipReason) -> Self {
        Self {
            dependency: dependency.label(),
            path: dependency.file.clone(),
            reason,
        }
    }
}

/// Why a dependency was not scanned
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SkipReason {
    /// No file, or a file without the archive extension
    NotAnArchive,
    /// The same physical archive was scanned earlier
    AlreadyProcessed,
    /// Matched an exclusion pattern
    Excluded { pattern: String },
    /// Could not be opened or enumerated
    Unreadable { message: String },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotAnArchive => write!(f, "not an archive"),
            Self::AlreadyProcessed => write!(f, "already processed"),
            Self::Excluded { pattern } => write!(f, "excluded by '{pattern}'"),
            Self::Unreadable { message } => write!(f, "unreadable: {message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ArchiveRef;

    fn group(previous: &str, current: &str, entries: &[&str]) -> CollisionGroup {
        CollisionGroup {
            previous: ArchiveRef::new(previous, "compile"),
            current: ArchiveRef::new(current, "compile"),
            entries: entries.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn test_empty_report() {
        let report = ScanReport::new();
        assert!(!report.has_collisions());
        assert_eq!(report.total_count(), 0);
        assert!(report.records().is_empty());
    }

    #[test]
    fn test_counts_and_records() {
        let mut report = ScanReport::new();
        report.collisions.push(group("/r/a.jar", "/r/b.jar", &["X.class", "Y.class"]));
        report.collisions.push(group("/r/b.jar", "/r/c.jar", &["Y.class"]));

        assert_eq!(report.total_count(), 2);
        assert_eq!(report.entry_count(), 3);

        let records = report.records();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].entry, "X.class");

        assert_eq!(report.collisions_for(Path::new("/r/b.jar")).count(), 2);
        assert_eq!(report.collisions_for(Path::new("/r/a.jar")).count(), 1);
    }

    #[test]
    fn test_merge() {
        let mut first = ScanReport::new();
        first.archives_scanned = 2;
        let mut second = ScanReport::new();
        second.archives_scanned = 1;
        second.collisions.push(group("/r/a.jar", "/r/b.jar", &["X.class"]));
        second.skipped.push(SkippedArchive {
            dependency: "/r/broken.jar".to_string(),
            path: Some(PathBuf::from("/r/broken.jar")),
            reason: SkipReason::Unreadable {
                message: "bad zip".to_string(),
            },
        });

        first.merge(second);
        assert_eq!(first.archives_scanned, 3);
        assert_eq!(first.total_count(), 1);
        assert_eq!(first.unreadable().count(), 1);
    }

    #[test]
    fn test_skip_reason_serialization() {
        let json = serde_json::to_string(&SkipReason::Excluded {
            pattern: "/shim".to_string(),
        })
        .unwrap();
        assert_eq!(json, r#"{"kind":"excluded","pattern":"/shim"}"#);
        assert_eq!(
            SkipReason::AlreadyProcessed.to_string(),
            "already processed"
        );
    }
}
