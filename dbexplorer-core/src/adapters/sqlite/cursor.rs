//! SQLite catalog reads.
//!
//! # SQLite System Tables
//! - `sqlite_master`: one row per table, index, view and trigger
//! - `PRAGMA table_info()`: one row per column of a table

use crate::Result;
use crate::adapters::{IntrospectionCursor, split_type_arguments};
use crate::error::ExplorerError;
use crate::models::ColumnDescription;
use async_trait::async_trait;
use sqlx::Row;
use sqlx::Sqlite;
use sqlx::pool::PoolConnection;

/// Cursor over one pooled SQLite connection.
///
/// The connection goes back to the pool when the cursor is dropped.
pub struct SqliteCursor {
    conn: PoolConnection<Sqlite>,
}

impl SqliteCursor {
    pub(crate) fn new(conn: PoolConnection<Sqlite>) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl IntrospectionCursor for SqliteCursor {
    async fn table_names(&mut self) -> Result<Vec<String>> {
        // sqlite_sequence is AUTOINCREMENT bookkeeping; sqlite_stat* tables
        // are left for the table filter to decide
        let tables_query = r#"
            SELECT name
            FROM sqlite_master
            WHERE type = 'table'
            AND name <> 'sqlite_sequence'
            ORDER BY name
        "#;

        sqlx::query_scalar::<_, String>(tables_query)
            .fetch_all(&mut *self.conn)
            .await
            .map_err(|e| {
                ExplorerError::introspection_failed("Failed to enumerate SQLite tables", e)
            })
    }

    async fn describe_table(&mut self, table_name: &str) -> Result<Vec<ColumnDescription>> {
        let columns_query = format!("PRAGMA table_info('{}')", table_name.replace('\'', "''"));

        let column_rows = sqlx::query(&columns_query)
            .fetch_all(&mut *self.conn)
            .await
            .map_err(|e| {
                ExplorerError::introspection_failed(
                    format!("Failed to describe table '{}'", table_name),
                    e,
                )
            })?;

        let mut columns = Vec::with_capacity(column_rows.len());

        for row in &column_rows {
            let name: String = row.try_get("name").map_err(|e| {
                ExplorerError::introspection_failed(
                    format!("Failed to parse column name for table '{}'", table_name),
                    e,
                )
            })?;
            let declared: String = row.try_get("type").unwrap_or_default();
            let notnull: i64 = row.try_get("notnull").unwrap_or(0);
            let pk: i64 = row.try_get("pk").unwrap_or(0);

            let (base, args) = split_type_arguments(&declared);
            let base = base.to_string();

            columns.push(ColumnDescription {
                name,
                type_code: base,
                max_length: args.first().copied().filter(|_| args.len() == 1),
                precision: args.first().copied().filter(|_| args.len() == 2),
                scale: args.get(1).copied(),
                // PRIMARY KEY columns are implicitly NOT NULL
                nullable: notnull == 0 && pk == 0,
                declared_type: Some(declared),
            });
        }

        Ok(columns)
    }
}
