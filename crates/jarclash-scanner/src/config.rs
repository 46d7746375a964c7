//! Checker configuration
//!
//! The engine never reads the environment. Everything is handed over by the
//! caller as a [`CheckerConfig`], optionally loaded from a JSON file.

use crate::archive::{ArchiveMatcher, DEFAULT_ARCHIVE_EXTENSION};
use crate::error::{ScanError, ScanResult};
use crate::exclusion::ExclusionSet;
use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::Path;

/// Scope label for archives that carry none of their own
pub const DEFAULT_SCOPE: &str = "compile";

/// Configuration for a duplicate-class check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckerConfig {
    /// Path substrings of archives that are known-safe replacements
    ///
    /// Patterns read from a file are added to the logging-bridge seeds.
    #[serde(deserialize_with = "seeded_exclusions")]
    pub exclusions: ExclusionSet,
    /// Whether the logging-bridge seeds stay in `exclusions`
    pub default_exclusions: bool,
    /// Extension a resolved file must have to be scanned
    pub archive_extension: String,
    /// Whether `test` scope dependencies take part in the check
    pub include_test_scope: bool,
    /// Scope label for archives discovered on disk or passed directly
    pub default_scope: String,
    /// Whether the caller should treat collisions as a failure
    pub fail_on_collision: bool,
}

impl Default for CheckerConfig {
    fn default() -> Self {
        Self {
            exclusions: ExclusionSet::logging_bridges(),
            default_exclusions: true,
            archive_extension: DEFAULT_ARCHIVE_EXTENSION.to_string(),
            include_test_scope: true,
            default_scope: DEFAULT_SCOPE.to_string(),
            fail_on_collision: false,
        }
    }
}

impl CheckerConfig {
    /// Load configuration from a JSON file; missing fields take their defaults
    ///
    /// # Errors
    /// Returns an error if the file cannot be read, parsed, or validated
    pub fn load(path: &Path) -> ScanResult<Self> {
        let content = fs::read_to_string(path)?;
        let mut config: Self = serde_json::from_str(&content)?;
        if !config.default_exclusions {
            config = config.without_default_exclusions();
        }
        config.validate()?;
        Ok(config)
    }

    /// Check field values that serde cannot
    ///
    /// # Errors
    /// Returns [`ScanError::InvalidConfig`] on a blank extension or scope
    pub fn validate(&self) -> ScanResult<()> {
        if self.archive_extension.trim_start_matches('.').trim().is_empty() {
            return Err(ScanError::InvalidConfig(
                "archiveExtension cannot be empty".to_string(),
            ));
        }
        if self.default_scope.trim().is_empty() {
            return Err(ScanError::InvalidConfig(
                "defaultScope cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Matcher built from `archive_extension`
    #[must_use]
    pub fn archive_matcher(&self) -> ArchiveMatcher {
        ArchiveMatcher::new(self.archive_extension.clone())
    }

    /// Drop the built-in logging-bridge exclusions, keeping any others
    #[must_use]
    pub fn without_default_exclusions(mut self) -> Self {
        let defaults = ExclusionSet::logging_bridges();
        self.exclusions = self
            .exclusions
            .patterns()
            .iter()
            .filter(|pattern| !defaults.patterns().contains(pattern))
            .cloned()
            .collect();
        self.default_exclusions = false;
        self
    }
}

fn seeded_exclusions<'de, D>(deserializer: D) -> Result<ExclusionSet, D::Error>
where
    D: Deserializer<'de>,
{
    let mut exclusions = ExclusionSet::logging_bridges();
    exclusions.extend(Vec::<String>::deserialize(deserializer)?);
    Ok(exclusions)
}
