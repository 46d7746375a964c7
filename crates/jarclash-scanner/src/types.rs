//! Shared types for the jarclash scanner

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};

/// Scope label given to test-only dependencies
pub const TEST_SCOPE: &str = "test";

/// A dependency as handed over by the resolver
///
/// The file may be missing when the resolver could not retrieve an archive
/// for the item; such dependencies are skipped by the scanner.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    /// Coordinates or any other human-readable identifier
    #[serde(default)]
    pub id: Option<String>,
    /// Logical scope label (compile, runtime, test, ...)
    #[serde(default = "default_scope")]
    pub scope: String,
    /// Resolved file, if any
    #[serde(default)]
    pub file: Option<PathBuf>,
}

impl Dependency {
    /// Create a dependency backed by a file
    pub fn new(scope: impl Into<String>, file: impl Into<PathBuf>) -> Self {
        Self {
            id: None,
            scope: scope.into(),
            file: Some(file.into()),
        }
    }

    /// Create a dependency the resolver could not retrieve a file for
    pub fn unresolved(id: impl Into<String>, scope: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            scope: scope.into(),
            file: None,
        }
    }

    /// Attach an identifier
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Whether this dependency carries the test scope
    #[must_use]
    pub fn is_test_scope(&self) -> bool {
        self.scope == TEST_SCOPE
    }

    /// Label used in log lines: id if known, else the file, else `<unknown>`
    #[must_use]
    pub fn label(&self) -> String {
        match (&self.id, &self.file) {
            (Some(id), _) => id.clone(),
            (None, Some(file)) => file.display().to_string(),
            (None, None) => "<unknown>".to_string(),
        }
    }
}

fn default_scope() -> String {
    crate::config::DEFAULT_SCOPE.to_string()
}

/// One resolved dependency archive
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ArchiveRef {
    /// Archive file path, unique per physical file
    pub path: PathBuf,
    /// Logical scope label, only used for reporting
    pub scope: String,
}

impl ArchiveRef {
    pub fn new(path: impl Into<PathBuf>, scope: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            scope: scope.into(),
        }
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The path as a string, used for substring matching and dedup keys
    #[must_use]
    pub fn path_key(&self) -> String {
        self.path.to_string_lossy().into_owned()
    }
}

impl fmt::Display for ArchiveRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]{}", self.scope, self.path.display())
    }
}
