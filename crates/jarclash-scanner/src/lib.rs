//! jarclash scanner - duplicate class detection
//!
//! Given the resolved dependency archives of a project, in classpath order,
//! this crate finds class entries that more than one archive provides under
//! the same path. Which copy the JVM loads then depends on archive ordering.

#![forbid(unsafe_code)]
#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::must_use_candidate,
    clippy::module_name_repetitions,
    clippy::too_many_lines,
    clippy::needless_pass_by_value,
    clippy::map_unwrap_or,
    clippy::format_push_string
)]

pub mod archive;
pub mod collision;
pub mod config;
pub mod entry;
pub mod error;
pub mod exclusion;
pub mod output;
pub mod report;
pub mod resolve;
pub mod scan;
pub mod types;

pub use archive::{scan_entries, ArchiveMatcher};
pub use collision::{CollisionGroup, CollisionRecord, CollisionRegistry};
pub use config::CheckerConfig;
pub use entry::is_trackable_entry;
pub use error::{ScanError, ScanResult};
pub use exclusion::{is_excluded_archive, ExclusionSet};
pub use report::{ScanReport, SkipReason, SkippedArchive};
pub use scan::Scanner;
pub use types::{ArchiveRef, Dependency};
