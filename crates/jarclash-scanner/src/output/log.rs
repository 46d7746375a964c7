//! Plain-text collision log
//!
//! The log file is append-only: a run opens with a timestamp banner followed
//! by one block per colliding archive pair. Callers that scan module by module
//! write the banner with the first report only, so one build shows up as one
//! run in the file.

use crate::error::ScanResult;
use crate::report::ScanReport;
use chrono::Local;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::Path;

const BANNER: &str = "******************************************";

/// Timestamp format used in the run banner
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Render a report as log text, banner included
#[must_use]
pub fn to_log(report: &ScanReport) -> String {
    render(report, true)
}

fn render(report: &ScanReport, banner: bool) -> String {
    let mut output = String::new();

    if banner {
        output.push_str(BANNER);
        output.push('\n');
        output.push_str(
            &report
                .scanned_at
                .with_timezone(&Local)
                .format(TIMESTAMP_FORMAT)
                .to_string(),
        );
        output.push('\n');
        output.push_str(BANNER);
        output.push('\n');
    }

    for group in &report.collisions {
        output.push_str("Duplicate classes found:\n");
        output.push_str(&format!("{}\n", group.current));
        output.push_str(&format!("{}\n", group.previous));
        for entry in &group.entries {
            output.push_str(&format!("Class: {entry}\n"));
        }
    }

    for skip in report.unreadable() {
        output.push_str(&format!("Skipped {}: {}\n", skip.dependency, skip.reason));
    }

    output
}

/// Append a report to the log file at `path`, creating it if needed
///
/// Pass `banner = false` for the follow-up reports of a run that already
/// wrote its banner.
///
/// # Errors
/// Returns an error if the file cannot be opened or written
pub fn append_log(report: &ScanReport, path: &Path, banner: bool) -> ScanResult<()> {
    let mut file = OpenOptions::new().create(true).append(true).open(path)?;
    file.write_all(render(report, banner).as_bytes())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::CollisionGroup;
    use crate::types::ArchiveRef;
    use tempfile::TempDir;

    fn report_with_collision() -> ScanReport {
        let mut report = ScanReport::new();
        report.collisions.push(CollisionGroup {
            previous: ArchiveRef::new("/r/a.jar", "compile"),
            current: ArchiveRef::new("/r/b.jar", "runtime"),
            entries: vec!["Y.class".to_string()],
        });
        report
    }

    #[test]
    fn test_log_block_layout() {
        let log = to_log(&report_with_collision());
        let lines: Vec<&str> = log.lines().collect();

        assert_eq!(lines[0], BANNER);
        assert_eq!(lines[2], BANNER);
        assert_eq!(
            &lines[3..],
            &[
                "Duplicate classes found:",
                "[runtime]/r/b.jar",
                "[compile]/r/a.jar",
                "Class: Y.class"
            ]
        );
    }

    #[test]
    fn test_append_accumulates() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dependency-check.log");

        append_log(&report_with_collision(), &path, true).unwrap();
        append_log(&ScanReport::new(), &path, true).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches(BANNER).count(), 4);
        assert_eq!(content.matches("Duplicate classes found:").count(), 1);
    }

    #[test]
    fn test_one_banner_per_multi_module_run() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("dependency-check.log");

        for (index, report) in [report_with_collision(), report_with_collision()]
            .iter()
            .enumerate()
        {
            append_log(report, &path, index == 0).unwrap();
        }

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content.matches(BANNER).count(), 2);
        assert_eq!(content.matches("Duplicate classes found:").count(), 2);
        assert!(content.starts_with(BANNER));
    }
}
