//! Markdown output formatter

use crate::report::ScanReport;

/// Convert a scan report to Markdown
#[must_use]
pub fn to_markdown(report: &ScanReport) -> String {
    let mut output = String::new();

    output.push_str("# Duplicate Class Report\n\n");
    output.push_str(&format!(
        "**Scanned at:** {}\n\n",
        report.scanned_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    output.push_str("## Summary\n\n");
    output.push_str(&format!(
        "- **Archives scanned:** {}\n",
        report.archives_scanned
    ));
    output.push_str(&format!(
        "- **Class entries checked:** {}\n",
        report.entries_checked
    ));
    output.push_str(&format!(
        "- **Colliding archive pairs:** {}\n",
        report.total_count()
    ));
    output.push_str(&format!("- **Skipped:** {}\n\n", report.skipped.len()));

    output.push_str("## Collisions\n\n");
    if report.has_collisions() {
        for group in &report.collisions {
            output.push_str(&format!(
                "### `{}` and `{}`\n\n",
                group.previous.path.display(),
                group.current.path.display()
            ));
            output.push_str(&format!(
                "- **Scopes:** {} / {}\n",
                group.previous.scope, group.current.scope
            ));
            output.push_str(&format!("- **Classes:** {}\n\n", group.entries.len()));
            for entry in &group.entries {
                output.push_str(&format!("  - `{entry}`\n"));
            }
            output.push('\n');
        }
    } else {
        output.push_str("_No collisions detected_\n\n");
    }

    let unreadable: Vec<_> = report.unreadable().collect();
    if !unreadable.is_empty() {
        output.push_str("## Unreadable Archives\n\n");
        for skip in unreadable {
            output.push_str(&format!("- `{}`: {}\n", skip.dependency, skip.reason));
        }
        output.push('\n');
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::CollisionGroup;
    use crate::types::ArchiveRef;

    #[test]
    fn test_markdown_no_collisions() {
        let md = to_markdown(&ScanReport::new());
        assert!(md.contains("# Duplicate Class Report"));
        assert!(md.contains("_No collisions detected_"));
        assert!(!md.contains("Unreadable"));
    }

    #[test]
    fn test_markdown_lists_entries() {
        let mut report = ScanReport::new();
        report.collisions.push(CollisionGroup {
            previous: ArchiveRef::new("/r/a.jar", "compile"),
            current: ArchiveRef::new("/r/b.jar", "runtime"),
            entries: vec!["com/x/Y.class".to_string(), "com/x/Z.class".to_string()],
        });

        let md = to_markdown(&report);
        assert!(md.contains("### `/r/a.jar` and `/r/b.jar`"));
        assert!(md.contains("- **Scopes:** compile / runtime"));
        assert!(md.contains("  - `com/x/Z.class`"));
    }
}
