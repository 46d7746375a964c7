//! Dependency inputs
//!
//! Resolution proper (walking a dependency graph, downloading archives) happens
//! outside this crate. These helpers turn what a resolver leaves behind, a
//! manifest file or a directory of archives, into an ordered dependency list.

use crate::error::{ScanError, ScanResult};
use crate::types::Dependency;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// A resolved dependency list as written by a build tool
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Manifest {
    #[serde(default)]
    pub dependencies: Vec<Dependency>,
}

impl Manifest {
    /// Parse a manifest from JSON text
    ///
    /// # Errors
    /// Returns [`ScanError::Resolution`] if the text is not a valid manifest
    pub fn parse(content: &str) -> ScanResult<Self> {
        serde_json::from_str(content)
            .map_err(|e| ScanError::Resolution(format!("invalid manifest: {e}")))
    }

    /// Read a manifest file
    ///
    /// # Errors
    /// Returns [`ScanError::Resolution`] if the file cannot be read or parsed
    pub fn load(path: &Path) -> ScanResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            ScanError::Resolution(format!("cannot read manifest {}: {e}", path.display()))
        })?;
        Self::parse(&content)
    }
}

/// Discover every file below `root`, sorted by file name within each directory
///
/// Non-archives are returned too; the scanner filters them out.
///
/// # Errors
/// Returns [`ScanError::Resolution`] if `root` does not exist or cannot be walked
pub fn discover(root: &Path, scope: &str) -> ScanResult<Vec<Dependency>> {
    if !root.exists() {
        return Err(ScanError::Resolution(format!(
            "path does not exist: {}",
            root.display()
        )));
    }

    let mut dependencies = Vec::new();
    for entry in WalkDir::new(root).sort_by_file_name() {
        let entry = entry.map_err(|e| ScanError::Resolution(e.to_string()))?;
        if entry.file_type().is_file() {
            dependencies.push(Dependency::new(scope, entry.into_path()));
        }
    }
    Ok(dependencies)
}

/// Turn command-line style paths into dependencies, in order
///
/// Files are taken as-is, directories are discovered.
///
/// # Errors
/// Returns [`ScanError::Resolution`] if a path does not exist
pub fn from_paths(paths: &[PathBuf], scope: &str) -> ScanResult<Vec<Dependency>> {
    let mut dependencies = Vec::new();
    for path in paths {
        if path.is_dir() {
            dependencies.extend(discover(path, scope)?);
        } else if path.exists() {
            dependencies.push(Dependency::new(scope, path.clone()));
        } else {
            return Err(ScanError::Resolution(format!(
                "path does not exist: {}",
                path.display()
            )));
        }
    }
    Ok(dependencies)
}

/// Drop `test` scope dependencies unless they are explicitly included
#[must_use]
pub fn apply_scope_policy(dependencies: Vec<Dependency>, include_test_scope: bool) -> Vec<Dependency> {
    if include_test_scope {
        return dependencies;
    }
    dependencies
        .into_iter()
        .filter(|dep| !dep.is_test_scope())
        .collect()
}
