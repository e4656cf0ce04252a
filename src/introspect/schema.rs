//! Live schema reading over `information_schema`.

use sqlx::postgres::PgConnectOptions;
use sqlx::{ConnectOptions, PgConnection, Row};
use std::collections::HashSet;
use std::str::FromStr;
use std::time::Duration;

use crate::config::DatabaseCredentials;
use crate::error::PipelineError;

/// Bounded timeout around the connection attempt; expiry is a connection
/// error like any other refusal.
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Internal bookkeeping tables never exposed as entities.
pub const DEFAULT_EXCLUDES: [&str; 3] = [
    "flyway_schema_history",
    "databasechangelog",
    "databasechangeloglock",
];

/// One introspected column.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnInfo {
    pub name: String,
    /// `information_schema` data type (e.g. `character varying`)
    pub data_type: String,
    pub nullable: bool,
    pub primary_key: bool,
}

/// One introspected table with its columns in ordinal order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableInfo {
    pub name: String,
    pub columns: Vec<ColumnInfo>,
}

impl TableInfo {
    /// First primary-key column, if the table has one.
    pub fn primary_key_column(&self) -> Option<&ColumnInfo> {
        self.columns.iter().find(|c| c.primary_key)
    }
}

/// Open a single connection to the target database.
///
/// Accepts `postgres://` URLs as well as JDBC-style `jdbc:postgresql://`
/// ones (the leading `jdbc:` is dropped). Username and password from the
/// credentials override anything embedded in the URL.
///
/// # Errors
///
/// Invalid URL, refusal, authentication failure and timeout all surface as
/// [`PipelineError::Connection`].
pub async fn connect(credentials: &DatabaseCredentials) -> Result<PgConnection, PipelineError> {
    let url = credentials
        .url
        .strip_prefix("jdbc:")
        .unwrap_or(&credentials.url);
    let options = PgConnectOptions::from_str(url)
        .map_err(|err| PipelineError::Connection(format!("invalid database url: {err}")))?
        .username(&credentials.username)
        .password(&credentials.password);
    match tokio::time::timeout(CONNECT_TIMEOUT, options.connect()).await {
        Ok(result) => result.map_err(PipelineError::from),
        Err(_) => Err(PipelineError::Connection(format!(
            "connection attempt timed out after {}s",
            CONNECT_TIMEOUT.as_secs()
        ))),
    }
}

/// Enumerate every base table of `schema`, excluding the denylist, with
/// columns and primary-key flags resolved from the catalog — never from
/// generated source text.
///
/// # Errors
///
/// Query failures surface as [`PipelineError::Connection`].
pub async fn read_schema(
    conn: &mut PgConnection,
    schema: &str,
    excludes: &[String],
) -> Result<Vec<TableInfo>, PipelineError> {
    let rows = sqlx::query(
        "SELECT table_name FROM information_schema.tables \
         WHERE table_schema = $1 AND table_type = 'BASE TABLE' \
         ORDER BY table_name",
    )
    .bind(schema)
    .fetch_all(&mut *conn)
    .await?;

    let mut tables = Vec::new();
    for row in rows {
        let name: String = row.get("table_name");
        if excludes.iter().any(|e| e == &name) {
            tracing::debug!("excluding bookkeeping table {name}");
            continue;
        }
        let columns = read_columns(conn, schema, &name).await?;
        tables.push(TableInfo { name, columns });
    }
    Ok(tables)
}

async fn read_columns(
    conn: &mut PgConnection,
    schema: &str,
    table: &str,
) -> Result<Vec<ColumnInfo>, PipelineError> {
    let pk_rows = sqlx::query(
        "SELECT kcu.column_name FROM information_schema.table_constraints tc \
         JOIN information_schema.key_column_usage kcu \
           ON tc.constraint_name = kcu.constraint_name \
          AND tc.table_schema = kcu.table_schema \
         WHERE tc.constraint_type = 'PRIMARY KEY' \
           AND tc.table_schema = $1 AND tc.table_name = $2 \
         ORDER BY kcu.ordinal_position",
    )
    .bind(schema)
    .bind(table)
    .fetch_all(&mut *conn)
    .await?;
    let primary_keys: HashSet<String> = pk_rows
        .iter()
        .map(|row| row.get::<String, _>("column_name"))
        .collect();

    let rows = sqlx::query(
        "SELECT column_name, data_type, is_nullable FROM information_schema.columns \
         WHERE table_schema = $1 AND table_name = $2 \
         ORDER BY ordinal_position",
    )
    .bind(schema)
    .bind(table)
    .fetch_all(&mut *conn)
    .await?;

    Ok(rows
        .iter()
        .map(|row| {
            let name: String = row.get("column_name");
            ColumnInfo {
                primary_key: primary_keys.contains(&name),
                data_type: row.get("data_type"),
                nullable: row.get::<String, _>("is_nullable") == "YES",
                name,
            }
        })
        .collect())
}
