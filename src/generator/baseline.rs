//! Initial migration baseline from the live schema.
//!
//! Re-reads the schema over a sequentially re-opened connection (never
//! concurrent with introspection) and writes one `createTable` change set
//! per table into the changelog directory the skeleton's master file
//! includes.

use serde::Serialize;
use sqlx::Connection;
use std::path::Path;

use crate::config::DatabaseCredentials;
use crate::error::PipelineError;
use crate::introspect::{connect, read_schema, IntrospectConfig, TableInfo};

use super::templates::write_file;

/// Changelog file emitted under `src/main/resources/db/changelog/changes/`.
pub const BASELINE_FILE_NAME: &str = "0001-initial-schema.yaml";

#[derive(Debug, Serialize)]
struct ChangeLog {
    #[serde(rename = "databaseChangeLog")]
    database_change_log: Vec<ChangeLogEntry>,
}

#[derive(Debug, Serialize)]
struct ChangeLogEntry {
    #[serde(rename = "changeSet")]
    change_set: ChangeSet,
}

#[derive(Debug, Serialize)]
struct ChangeSet {
    id: String,
    author: String,
    changes: Vec<Change>,
}

#[derive(Debug, Serialize)]
struct Change {
    #[serde(rename = "createTable")]
    create_table: CreateTable,
}

#[derive(Debug, Serialize)]
struct CreateTable {
    #[serde(rename = "tableName")]
    table_name: String,
    columns: Vec<ColumnEntry>,
}

#[derive(Debug, Serialize)]
struct ColumnEntry {
    column: ColumnSpec,
}

#[derive(Debug, Serialize)]
struct ColumnSpec {
    name: String,
    #[serde(rename = "type")]
    column_type: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    constraints: Option<Constraints>,
}

#[derive(Debug, Serialize)]
struct Constraints {
    #[serde(rename = "primaryKey", skip_serializing_if = "Option::is_none")]
    primary_key: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    nullable: Option<bool>,
}

/// Generate the baseline changelog for the live schema.
///
/// # Errors
///
/// Connection and query failures are fatal [`PipelineError::Connection`];
/// serialization and writes propagate their own errors.
pub async fn generate(
    credentials: &DatabaseCredentials,
    config: &IntrospectConfig,
) -> Result<(), PipelineError> {
    let mut conn = connect(credentials).await?;
    let tables = read_schema(&mut conn, &config.schema, &config.excludes).await?;
    if let Err(err) = conn.close().await {
        tracing::debug!("connection close reported: {err}");
    }

    let changelog = build_changelog(&tables);
    let yaml = serde_yaml::to_string(&changelog)?;
    let path = baseline_path(&config.project_dir);
    write_file(&path, &yaml)?;
    tracing::info!(
        "✅ wrote schema baseline for {} tables → {}",
        tables.len(),
        path.display()
    );
    Ok(())
}

fn baseline_path(project_dir: &Path) -> std::path::PathBuf {
    project_dir
        .join("src")
        .join("main")
        .join("resources")
        .join("db")
        .join("changelog")
        .join("changes")
        .join(BASELINE_FILE_NAME)
}

fn build_changelog(tables: &[TableInfo]) -> ChangeLog {
    let entries = tables
        .iter()
        .map(|table| ChangeLogEntry {
            change_set: ChangeSet {
                id: format!("baseline-{}", table.name),
                author: "springforge".to_string(),
                changes: vec![Change {
                    create_table: CreateTable {
                        table_name: table.name.clone(),
                        columns: table
                            .columns
                            .iter()
                            .map(|column| ColumnEntry {
                                column: ColumnSpec {
                                    name: column.name.clone(),
                                    column_type: column.data_type.clone(),
                                    constraints: constraints_for(
                                        column.primary_key,
                                        column.nullable,
                                    ),
                                },
                            })
                            .collect(),
                    },
                }],
            },
        })
        .collect();
    ChangeLog {
        database_change_log: entries,
    }
}

fn constraints_for(primary_key: bool, nullable: bool) -> Option<Constraints> {
    if primary_key {
        Some(Constraints {
            primary_key: Some(true),
            nullable: Some(false),
        })
    } else if !nullable {
        Some(Constraints {
            primary_key: None,
            nullable: Some(false),
        })
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::introspect::ColumnInfo;

    fn fixture() -> Vec<TableInfo> {
        vec![TableInfo {
            name: "tb_order_item".into(),
            columns: vec![
                ColumnInfo {
                    name: "id".into(),
                    data_type: "bigint".into(),
                    nullable: false,
                    primary_key: true,
                },
                ColumnInfo {
                    name: "note".into(),
                    data_type: "text".into(),
                    nullable: true,
                    primary_key: false,
                },
            ],
        }]
    }

    #[test]
    fn test_changelog_shape() {
        let yaml = serde_yaml::to_string(&build_changelog(&fixture())).unwrap();
        assert!(yaml.contains("databaseChangeLog:"));
        assert!(yaml.contains("changeSet:"));
        assert!(yaml.contains("id: baseline-tb_order_item"));
        assert!(yaml.contains("createTable:"));
        assert!(yaml.contains("tableName: tb_order_item"));
        assert!(yaml.contains("primaryKey: true"));
        assert!(yaml.contains("type: bigint"));
    }

    #[test]
    fn test_nullable_column_has_no_constraints_block() {
        let changelog = build_changelog(&fixture());
        let columns = &changelog.database_change_log[0].change_set.changes[0]
            .create_table
            .columns;
        assert!(columns[0].column.constraints.is_some());
        assert!(columns[1].column.constraints.is_none());
    }
}
