//! Error types for the jarclash scanner

use std::path::PathBuf;
use thiserror::Error;

/// Result type for scanner operations
pub type ScanResult<T> = Result<T, ScanError>;

/// Errors that can occur during scanning
#[derive(Error, Debug)]
pub enum ScanError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Failed to parse JSON
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// Archive could not be opened or is corrupt
    #[error("Archive unreadable: {path}: {reason}")]
    ArchiveUnreadable { path: PathBuf, reason: String },

    /// The dependency set could not be produced
    #[error("Dependency resolution failed: {0}")]
    Resolution(String),

    /// Invalid path
    #[error("Invalid path: {0}")]
    InvalidPath(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),
}

impl ScanError {
    pub(crate) fn unreadable(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::ArchiveUnreadable {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Get the error code for CLI output
    #[must_use]
    pub fn code(&self) -> &'static str {
        match self {
            Self::Io(_) => "IO_ERROR",
            Self::JsonParse(_) => "PARSE_ERROR",
            Self::ArchiveUnreadable { .. } => "ARCHIVE_UNREADABLE",
            Self::Resolution(_) => "RESOLUTION_FAILURE",
            Self::InvalidPath(_) => "INVALID_PATH",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
        }
    }

    /// Whether the error only affects a single archive and the run can go on
    #[must_use]
    pub fn is_per_archive(&self) -> bool {
        matches!(self, Self::ArchiveUnreadable { .. })
    }
}
