//! Entity metadata hand-off between schema introspection and data-access
//! interface generation.
//!
//! The introspector flushes the complete set once, the interface generator
//! loads it once, and the orchestrator deletes the file afterwards. The file
//! is transient working state for a single pipeline run, never durable
//! output.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PipelineError;

/// File name of the transient metadata exchange file.
pub const METADATA_FILE_NAME: &str = "repository-metadata.json";

/// One record per introspected table that has a primary key.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntityMetadata {
    #[serde(rename = "tableName")]
    pub table_name: String,
    #[serde(rename = "pojoClassName")]
    pub entity_class_name: String,
    #[serde(rename = "pojoPackageName")]
    pub entity_package_name: String,
    #[serde(rename = "primaryKeyType")]
    pub primary_key_type: String,
}

/// The complete, ordered set produced by one introspection run.
pub type EntityMetadataSet = Vec<EntityMetadata>;

/// Fixed location of the exchange file inside the generated source tree.
pub fn metadata_path(project_dir: &Path) -> PathBuf {
    project_dir
        .join("src")
        .join("main")
        .join("java")
        .join(METADATA_FILE_NAME)
}

/// Serialize the complete metadata set to `path`.
///
/// Called exactly once, after introspection has enumerated every table.
///
/// # Errors
///
/// Returns an error if serialization or the file write fails.
pub fn flush(set: &[EntityMetadata], path: &Path) -> Result<(), PipelineError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(set)?;
    fs::write(path, json)?;
    tracing::info!(
        "flushed {} entity metadata records → {}",
        set.len(),
        path.display()
    );
    Ok(())
}

/// Load a previously flushed metadata set, preserving record order.
///
/// # Errors
///
/// A missing or unreadable file is reported as a generation error carrying a
/// diagnostic — it means interface generation ran before introspection
/// flushed its output.
pub fn load(path: &Path) -> Result<EntityMetadataSet, PipelineError> {
    let content = fs::read_to_string(path).map_err(|err| PipelineError::Generation {
        subject: path.display().to_string(),
        reason: format!("entity metadata unavailable (did schema introspection run?): {err}"),
    })?;
    Ok(serde_json::from_str(&content)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_set() -> EntityMetadataSet {
        vec![
            EntityMetadata {
                table_name: "tb_order_item".into(),
                entity_class_name: "OrderItem".into(),
                entity_package_name: "com.example.demo.infrastructure.repositories.tables.pojos"
                    .into(),
                primary_key_type: "Long".into(),
            },
            EntityMetadata {
                table_name: "users".into(),
                entity_class_name: "Users".into(),
                entity_package_name: "com.example.demo.infrastructure.repositories.tables.pojos"
                    .into(),
                primary_key_type: "UUID".into(),
            },
        ]
    }

    #[test]
    fn test_round_trip_preserves_set() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(METADATA_FILE_NAME);
        let set = sample_set();
        flush(&set, &path).unwrap();
        let loaded = load(&path).unwrap();
        assert_eq!(loaded, set);
    }

    #[test]
    fn test_wire_format_uses_pojo_field_names() {
        let json = serde_json::to_string(&sample_set()).unwrap();
        assert!(json.contains("\"tableName\""));
        assert!(json.contains("\"pojoClassName\""));
        assert!(json.contains("\"pojoPackageName\""));
        assert!(json.contains("\"primaryKeyType\""));
    }

    #[test]
    fn test_load_before_flush_is_diagnosed() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join(METADATA_FILE_NAME);
        let err = load(&missing).unwrap_err();
        assert!(matches!(err, PipelineError::Generation { .. }));
        assert!(err.to_string().contains("introspection"));
    }

    #[test]
    fn test_metadata_path_is_inside_source_tree() {
        let path = metadata_path(Path::new("/tmp/demo-1"));
        assert!(path.ends_with(
            Path::new("src")
                .join("main")
                .join("java")
                .join(METADATA_FILE_NAME)
        ));
    }
}
