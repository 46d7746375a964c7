//! Archive exclusions
//!
//! Some archives intentionally ship classes under another archive's paths,
//! e.g. `log4j-over-slf4j` replaces `log4j`. Those archives are skipped
//! entirely: never scanned, never reported on either side of a collision.

use serde::{Deserialize, Serialize};
use std::path::MAIN_SEPARATOR;

/// Artifact names of the logging bridges that stand in for another archive
pub const LOGGING_BRIDGES: [&str; 2] = ["log4j-over-slf4j", "jcl-over-slf4j"];

/// A set of path substrings identifying known-safe replacement archives
///
/// Deserialization goes through [`ExclusionSet::insert`], so blank and
/// duplicate patterns never make it into the set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<String>", into = "Vec<String>")]
pub struct ExclusionSet {
    patterns: Vec<String>,
}

impl ExclusionSet {
    /// Create an empty exclusion set
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The logging-bridge seeds, each prefixed by the path separator so that
    /// only archives whose file name starts with the artifact name match
    #[must_use]
    pub fn logging_bridges() -> Self {
        LOGGING_BRIDGES
            .iter()
            .map(|name| format!("{MAIN_SEPARATOR}{name}"))
            .collect()
    }

    /// Add a pattern; blank and duplicate patterns are ignored
    pub fn insert(&mut self, pattern: impl Into<String>) {
        let pattern = pattern.into();
        if pattern.trim().is_empty() || self.patterns.contains(&pattern) {
            return;
        }
        self.patterns.push(pattern);
    }

    /// Whether `archive_path` contains any pattern as a substring
    #[must_use]
    pub fn is_excluded(&self, archive_path: &str) -> bool {
        self.matching(archive_path).is_some()
    }

    /// The first pattern contained in `archive_path`, if any
    #[must_use]
    pub fn matching(&self, archive_path: &str) -> Option<&str> {
        self.patterns
            .iter()
            .map(String::as_str)
            .find(|pattern| archive_path.contains(pattern))
    }

    #[must_use]
    pub fn patterns(&self) -> &[String] {
        &self.patterns
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }
}

impl<S: Into<String>> FromIterator<S> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut set = Self::new();
        set.extend(iter);
        set
    }
}

impl<S: Into<String>> Extend<S> for ExclusionSet {
    fn extend<I: IntoIterator<Item = S>>(&mut self, iter: I) {
        for pattern in iter {
            self.insert(pattern);
        }
    }
}

impl From<Vec<String>> for ExclusionSet {
    fn from(patterns: Vec<String>) -> Self {
        patterns.into_iter().collect()
    }
}

impl From<ExclusionSet> for Vec<String> {
    fn from(set: ExclusionSet) -> Self {
        set.patterns
    }
}

/// Whether `archive_path` contains any of `exclusions` as a substring
#[must_use]
pub fn is_excluded_archive(archive_path: &str, exclusions: &ExclusionSet) -> bool {
    exclusions.is_excluded(archive_path)
}
