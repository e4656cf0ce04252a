//! Data-access interface generation from the Entity Metadata Set.
//!
//! Each record is processed independently: one failed entity is logged and
//! counted without stopping the rest, and the aggregate summary is the
//! orchestrator's signal for a warning. Re-running against the same set and
//! output directory overwrites files with byte-identical content.

use askama::Template;
use std::path::Path;

use crate::config::ProjectIdentity;
use crate::error::PipelineError;
use crate::naming::{java_import_for, package_to_path};

use super::metadata::EntityMetadata;
use super::templates::{write_file, RepositoryTemplate};

/// Outcome counts for one interface-generation stage.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GenerationSummary {
    pub generated: usize,
    pub failed: usize,
}

/// Render one `<Entity>Repository` interface per metadata record.
///
/// Never fails as a whole; per-entity errors are logged and reflected in the
/// returned summary.
pub fn generate(
    set: &[EntityMetadata],
    identity: &ProjectIdentity,
    project_dir: &Path,
) -> GenerationSummary {
    let package_name = format!("{}.infrastructure.repositories", identity.package_root);
    let out_dir = project_dir
        .join("src")
        .join("main")
        .join("java")
        .join(package_to_path(&package_name));

    let mut summary = GenerationSummary::default();
    for metadata in set {
        match generate_one(metadata, &package_name, &out_dir) {
            Ok(class_name) => {
                tracing::info!("✅ generated repository {class_name}");
                summary.generated += 1;
            }
            Err(err) => {
                tracing::warn!(
                    "⚠️  repository generation for table {} failed: {err}",
                    metadata.table_name
                );
                summary.failed += 1;
            }
        }
    }
    tracing::info!(
        "repository generation finished: {} generated, {} failed",
        summary.generated,
        summary.failed
    );
    summary
}

fn generate_one(
    metadata: &EntityMetadata,
    package_name: &str,
    out_dir: &Path,
) -> Result<String, PipelineError> {
    let class_name = format!("{}Repository", metadata.entity_class_name);
    let imports = java_import_for(&metadata.primary_key_type)
        .map(|import| vec![import.to_string()])
        .unwrap_or_default();
    let rendered = RepositoryTemplate {
        package_name: package_name.to_string(),
        class_name: class_name.clone(),
        pojo_class_name: metadata.entity_class_name.clone(),
        pojo_package_name: metadata.entity_package_name.clone(),
        primary_key_type: metadata.primary_key_type.clone(),
        imports,
    }
    .render()?;
    write_file(&out_dir.join(format!("{class_name}.java")), &rendered)?;
    Ok(class_name)
}
