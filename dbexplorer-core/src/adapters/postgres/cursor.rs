//! PostgreSQL catalog reads.

use crate::Result;
use crate::adapters::IntrospectionCursor;
use crate::error::ExplorerError;
use crate::models::ColumnDescription;
use async_trait::async_trait;
use sqlx::Row;
use sqlx::pool::PoolConnection;
use sqlx::postgres::Postgres;

/// Cursor over one pooled PostgreSQL connection.
///
/// The connection goes back to the pool when the cursor is dropped.
pub struct PostgresCursor {
    conn: PoolConnection<Postgres>,
}

impl PostgresCursor {
    pub(crate) fn new(conn: PoolConnection<Postgres>) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl IntrospectionCursor for PostgresCursor {
    async fn table_names(&mut self) -> Result<Vec<String>> {
        // Ordinary and partitioned tables on the search_path
        let tables_query = r#"
            SELECT c.relname::text
            FROM pg_catalog.pg_class c
            JOIN pg_catalog.pg_namespace n ON n.oid = c.relnamespace
            WHERE c.relkind IN ('r', 'p')
            AND n.nspname NOT IN ('pg_catalog', 'information_schema')
            AND n.nspname !~ '^pg_toast'
            AND pg_catalog.pg_table_is_visible(c.oid)
            ORDER BY c.relname
        "#;

        sqlx::query_scalar::<_, String>(tables_query)
            .fetch_all(&mut *self.conn)
            .await
            .map_err(|e| {
                ExplorerError::introspection_failed("Failed to enumerate PostgreSQL tables", e)
            })
    }

    async fn describe_table(&mut self, table_name: &str) -> Result<Vec<ColumnDescription>> {
        // Resolve the schema the same way an unqualified name would be
        let columns_query = r#"
            SELECT
                c.column_name::text AS column_name,
                c.udt_name::text AS udt_name,
                c.data_type::text AS data_type,
                c.character_maximum_length::int4 AS character_maximum_length,
                c.numeric_precision::int4 AS numeric_precision,
                c.numeric_scale::int4 AS numeric_scale,
                (c.is_nullable::text = 'YES') AS is_nullable
            FROM information_schema.columns c
            WHERE c.table_name::text = $1
            AND c.table_schema::text = (
                SELECT n.nspname::text
                FROM pg_catalog.pg_class pc
                JOIN pg_catalog.pg_namespace n ON n.oid = pc.relnamespace
                WHERE pc.relname::text = $1
                AND pg_catalog.pg_table_is_visible(pc.oid)
                LIMIT 1
            )
            ORDER BY c.ordinal_position
        "#;

        let column_rows = sqlx::query(columns_query)
            .bind(table_name)
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
            let name: String = row.try_get("column_name").map_err(|e| {
                ExplorerError::introspection_failed(
                    format!("Failed to parse column name for table '{}'", table_name),
                    e,
                )
            })?;
            let udt_name: String = row.try_get("udt_name").unwrap_or_default();
            let data_type: Option<String> = row.try_get("data_type").ok();
            let max_length: Option<i32> = row.try_get("character_maximum_length").unwrap_or(None);
            let precision: Option<i32> = row.try_get("numeric_precision").unwrap_or(None);
            let scale: Option<i32> = row.try_get("numeric_scale").unwrap_or(None);
            let nullable: bool = row.try_get("is_nullable").unwrap_or(true);

            columns.push(ColumnDescription {
                name,
                type_code: udt_name,
                declared_type: data_type,
                max_length: max_length.and_then(|v| u32::try_from(v).ok()),
                precision: precision.and_then(|v| u32::try_from(v).ok()),
                scale: scale.and_then(|v| u32::try_from(v).ok()),
                nullable,
            });
        }

        Ok(columns)
    }
}
