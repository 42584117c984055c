//! Snapshot assembly.
//!
//! Wraps the scanned file records with project-level metadata. No I/O
//! happens here; the store persists the result.

use crate::model::{FileRecord, Level, ProjectSnapshot};

/// Builds the snapshot for one scan, preserving file order.
pub fn build_snapshot(
    project_name: impl Into<String>,
    level: Level,
    files: Vec<FileRecord>,
) -> ProjectSnapshot {
    ProjectSnapshot {
        project_name: project_name.into(),
        level,
        files,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DeclarationKind, ExportDescriptor};

    #[test]
    fn test_build_snapshot_preserves_order_and_records() {
        let files = vec![
            FileRecord::new("z.js".to_string(), vec!["./a".to_string()], vec![]),
            FileRecord::new(
                "a.js".to_string(),
                vec![],
                vec![ExportDescriptor::named(DeclarationKind::Const, "A")],
            ),
        ];

        let snapshot = build_snapshot("web", Level::L3, files.clone());

        assert_eq!(snapshot.project_name, "web");
        assert_eq!(snapshot.level, Level::L3);
        assert_eq!(snapshot.files, files);
    }

    #[test]
    fn test_snapshot_json_has_only_model_fields() {
        let snapshot = build_snapshot("web", Level::L1, vec![]);
        let value = serde_json::to_value(&snapshot).unwrap();
        let keys: Vec<_> = value.as_object().unwrap().keys().cloned().collect();

        assert_eq!(keys.len(), 3);
        assert_eq!(value["projectName"], "web");
        assert_eq!(value["level"], "L1");
        assert!(value["files"].as_array().unwrap().is_empty());
    }
}
