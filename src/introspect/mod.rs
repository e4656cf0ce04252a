//! # Schema Introspector
//!
//! Connects to the live database, enumerates tables and emits one JPA entity
//! source per table, producing the Entity Metadata Set as a side artifact.
//!
//! The flow is a plain post-processing pipeline rather than generator
//! callbacks: the engine emits everything it knows (entity sources plus the
//! catalog/schema marker classes tooling expects), then the wrapper deletes
//! the placeholder markers and returns the metadata set. Primary-key types
//! come from the introspected column type, not from reading generated
//! sources back.

mod schema;


pub use schema::{connect, read_schema, ColumnInfo, TableInfo, CONNECT_TIMEOUT, DEFAULT_EXCLUDES};

use askama::Template;
use sqlx::Connection;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::DatabaseCredentials;
use crate::error::PipelineError;
use crate::generator::metadata::{EntityMetadata, EntityMetadataSet};
use crate::generator::templates::{
    write_file, EntityClassTemplate, JavaField, SchemaMarkerTemplate,
};
use crate::naming::{
    java_import_for, java_type_for_sql, package_to_path, resolve_type_name, to_camel_case,
    NameMode,
};

/// Declarative configuration for one introspection run.
#[derive(Debug, Clone)]
pub struct IntrospectConfig {
    pub package_root: String,
    pub project_dir: PathBuf,
    pub schema: String,
    pub excludes: Vec<String>,
}

impl IntrospectConfig {
    pub fn new(package_root: &str, project_dir: &Path) -> Self {
        Self {
            package_root: package_root.to_string(),
            project_dir: project_dir.to_path_buf(),
            schema: "public".to_string(),
            excludes: DEFAULT_EXCLUDES.iter().map(|s| s.to_string()).collect(),
        }
    }

    /// Package the emitted entity sources live in.
    pub fn pojo_package(&self) -> String {
        format!(
            "{}.infrastructure.repositories.tables.pojos",
            self.package_root
        )
    }

    /// Directory backing the `infrastructure.repositories` package.
    pub fn repositories_dir(&self) -> PathBuf {
        self.project_dir
            .join("src")
            .join("main")
            .join("java")
            .join(package_to_path(&self.package_root))
            .join("infrastructure")
            .join("repositories")
    }
}

/// Introspect the live database and emit entity sources.
///
/// Blocking from the pipeline's point of view; returns only once every table
/// has been enumerated, so the returned set is complete and closed.
///
/// # Errors
///
/// A missing or refused connection is a fatal [`PipelineError::Connection`].
/// A single table without a primary key is logged and excluded, not fatal.
pub async fn introspect(
    credentials: &DatabaseCredentials,
    config: &IntrospectConfig,
) -> Result<EntityMetadataSet, PipelineError> {
    let mut conn = connect(credentials).await?;
    let tables = read_schema(&mut conn, &config.schema, &config.excludes).await?;
    if let Err(err) = conn.close().await {
        tracing::debug!("connection close reported: {err}");
    }

    let metadata = emit_entity_sources(&tables, config)?;
    remove_placeholder_sources(config);

    tracing::info!(
        "✅ introspected {} tables, {} with primary keys",
        tables.len(),
        metadata.len()
    );
    Ok(metadata)
}

/// Emit one entity source per table plus the catalog/schema markers, and
/// collect metadata for every table that has a primary key.
fn emit_entity_sources(
    tables: &[TableInfo],
    config: &IntrospectConfig,
) -> Result<EntityMetadataSet, PipelineError> {
    let pojo_package = config.pojo_package();
    let repositories_dir = config.repositories_dir();
    let pojo_dir = repositories_dir.join("tables").join("pojos");

    let mut metadata = Vec::new();
    for table in tables {
        let class_name = resolve_type_name(&table.name, NameMode::DataObject);
        let fields: Vec<JavaField> = table
            .columns
            .iter()
            .map(|column| {
                let mut field =
                    JavaField::new(&to_camel_case(&column.name), java_type_for_sql(&column.data_type));
                field.column_name = column.name.clone();
                field.primary_key = column.primary_key;
                field.nullable = column.nullable;
                field
            })
            .collect();

        let mut imports: Vec<String> = Vec::new();
        for field in &fields {
            if let Some(import) = java_import_for(&field.java_type) {
                if !imports.iter().any(|i| i == import) {
                    imports.push(import.to_string());
                }
            }
        }
        imports.sort();

        let rendered = EntityClassTemplate {
            package_name: pojo_package.clone(),
            class_name: class_name.clone(),
            table_name: table.name.clone(),
            imports,
            fields,
        }
        .render()?;
        write_file(&pojo_dir.join(format!("{class_name}.java")), &rendered)?;

        match table.primary_key_column() {
            Some(pk) => metadata.push(EntityMetadata {
                table_name: table.name.clone(),
                entity_class_name: class_name,
                entity_package_name: pojo_package.clone(),
                primary_key_type: java_type_for_sql(&pk.data_type).to_string(),
            }),
            None => tracing::warn!(
                "⚠️  table {} has no primary key; no repository will be generated",
                table.name
            ),
        }
    }

    for marker in placeholder_class_names(&config.schema) {
        let rendered = SchemaMarkerTemplate {
            package_name: config.package_root.clone() + ".infrastructure.repositories",
            class_name: marker.clone(),
            schema_name: config.schema.clone(),
        }
        .render()?;
        write_file(&repositories_dir.join(format!("{marker}.java")), &rendered)?;
    }

    Ok(metadata)
}

/// Marker classes the engine emits for tool compatibility; they carry no
/// semantic content and are removed by the post-processing pass.
fn placeholder_class_names(schema: &str) -> Vec<String> {
    vec![
        "DefaultCatalog".to_string(),
        resolve_type_name(schema, NameMode::DataObject),
    ]
}

/// Delete engine-produced placeholder files. Best effort: a failure here is
/// logged and never escalated.
fn remove_placeholder_sources(config: &IntrospectConfig) {
    let repositories_dir = config.repositories_dir();
    for marker in placeholder_class_names(&config.schema) {
        let path = repositories_dir.join(format!("{marker}.java"));
        if path.exists() {
            match fs::remove_file(&path) {
                Ok(()) => tracing::debug!("removed placeholder {}", path.display()),
                Err(err) => tracing::warn!(
                    "⚠️  could not remove placeholder {}: {err}",
                    path.display()
                ),
            }
        }
    }
}
