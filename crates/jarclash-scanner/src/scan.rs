//! Main scanner implementation

use crate::archive::{read_class_entries, ArchiveMatcher};
use crate::collision::{CollisionGroup, CollisionRegistry, GroupCollector};
use crate::config::CheckerConfig;
use crate::entry::is_trackable_entry;
use crate::error::ScanResult;
use crate::exclusion::ExclusionSet;
use crate::report::{ScanReport, SkipReason, SkippedArchive};
use crate::types::{ArchiveRef, Dependency};
use rayon::prelude::*;
use std::collections::HashSet;
use tracing::{debug, info, warn};

/// Detects classes provided by more than one dependency archive
///
/// Ownership records and the set of processed archives live on the scanner
/// and persist across [`Scanner::run`] calls, so a multi-module build can feed
/// each module's dependencies in turn without rescanning shared archives.
#[derive(Debug, Default)]
pub struct Scanner {
    exclusions: ExclusionSet,
    matcher: ArchiveMatcher,
    registry: CollisionRegistry,
    processed: HashSet<String>,
}

impl Scanner {
    /// Create a scanner with no exclusions and the default archive extension
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a scanner from a checker configuration
    #[must_use]
    pub fn from_config(config: &CheckerConfig) -> Self {
        Self::new()
            .with_exclusions(config.exclusions.clone())
            .with_matcher(config.archive_matcher())
    }

    /// Set the archives to skip entirely
    #[must_use]
    pub fn with_exclusions(mut self, exclusions: ExclusionSet) -> Self {
        self.exclusions = exclusions;
        self
    }

    /// Set which resolved files count as archives
    #[must_use]
    pub fn with_matcher(mut self, matcher: ArchiveMatcher) -> Self {
        self.matcher = matcher;
        self
    }

    #[must_use]
    pub fn exclusions(&self) -> &ExclusionSet {
        &self.exclusions
    }

    /// Whether the archive at `path` was already scanned by this scanner
    #[must_use]
    pub fn is_processed(&self, path: &str) -> bool {
        self.processed.contains(path)
    }

    /// Forget all ownership records and processed archives
    pub fn reset(&mut self) {
        self.registry.clear();
        self.processed.clear();
    }

    /// Check `dependencies` in order and report every collision
    ///
    /// Archive contents are enumerated in parallel, but ownership is updated
    /// strictly in input order, so the report does not depend on scheduling.
    /// Unreadable archives are skipped with a warning.
    pub fn run(&mut self, dependencies: &[Dependency]) -> ScanReport {
        let mut report = ScanReport::new();

        let mut selected = Vec::new();
        for dependency in dependencies {
            match self.select(dependency) {
                Ok(archive) => selected.push(archive),
                Err(reason) => {
                    debug!(dependency = %dependency.label(), %reason, "skipping dependency");
                    report.skipped.push(SkippedArchive::new(dependency, reason));
                }
            }
        }

        let listings: Vec<ScanResult<Vec<String>>> = selected
            .par_iter()
            .map(|archive| read_class_entries(&archive.path))
            .collect();

        for (archive, listing) in selected.into_iter().zip(listings) {
            match listing {
                Ok(entries) => {
                    report.archives_scanned += 1;
                    let (checked, groups) = self.apply(&archive, &entries);
                    report.entries_checked += checked;
                    for group in &groups {
                        warn!(
                            previous = %group.previous,
                            current = %group.current,
                            entries = group.entries.len(),
                            first = %group.entries[0],
                            "duplicate classes found"
                        );
                    }
                    report.collisions.extend(groups);
                }
                Err(e) => {
                    warn!(archive = %archive.path.display(), error = %e, "skipping unreadable archive");
                    report.skipped.push(SkippedArchive {
                        dependency: archive.path.display().to_string(),
                        path: Some(archive.path),
                        reason: SkipReason::Unreadable {
                            message: e.to_string(),
                        },
                    });
                }
            }
        }

        info!(
            archives = report.archives_scanned,
            entries = report.entries_checked,
            collisions = report.total_count(),
            "scan complete"
        );
        report
    }

    /// Decide whether `dependency` gets scanned, marking it processed if so
    fn select(&mut self, dependency: &Dependency) -> Result<ArchiveRef, SkipReason> {
        let Some(file) = dependency.file.as_ref() else {
            return Err(SkipReason::NotAnArchive);
        };
        if !self.matcher.matches(file) {
            return Err(SkipReason::NotAnArchive);
        }

        let archive = ArchiveRef::new(file.clone(), dependency.scope.clone());
        let key = archive.path_key();
        if self.processed.contains(&key) {
            return Err(SkipReason::AlreadyProcessed);
        }
        if let Some(pattern) = self.exclusions.matching(&key) {
            return Err(SkipReason::Excluded {
                pattern: pattern.to_string(),
            });
        }

        self.processed.insert(key);
        Ok(archive)
    }

    /// Feed one archive's entries to the registry
    ///
    /// Returns the number of trackable entries and the collisions found,
    /// grouped by previous owner.
    fn apply(&mut self, archive: &ArchiveRef, entries: &[String]) -> (usize, Vec<CollisionGroup>) {
        let mut collector = GroupCollector::default();
        let mut checked = 0;

        for entry in entries.iter().filter(|entry| is_trackable_entry(entry)) {
            checked += 1;
            if let Some(record) = self.registry.observe(entry, archive) {
                collector.push(record);
            }
        }

        (checked, collector.finish())
    }
}
