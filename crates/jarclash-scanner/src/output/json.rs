//! JSON output formatter

use crate::error::ScanResult;
use crate::report::ScanReport;

/// Convert a scan report to a JSON string
///
/// # Errors
/// Returns an error if serialization fails
pub fn to_json(report: &ScanReport) -> ScanResult<String> {
    serde_json::to_string_pretty(report).map_err(Into::into)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::collision::CollisionGroup;
    use crate::types::ArchiveRef;

    #[test]
    fn test_json_contains_groups() {
        let mut report = ScanReport::new();
        report.collisions.push(CollisionGroup {
            previous: ArchiveRef::new("/r/a.jar", "compile"),
            current: ArchiveRef::new("/r/b.jar", "runtime"),
            entries: vec!["Y.class".to_string()],
        });

        let json = to_json(&report).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        let group = &value["collisions"][0];
        assert_eq!(group["previous"]["scope"], "compile");
        assert_eq!(group["current"]["path"], "/r/b.jar");
        assert_eq!(group["entries"][0], "Y.class");

        let back: ScanReport = serde_json::from_str(&json).unwrap();
        assert_eq!(back.collisions, report.collisions);
    }
}
