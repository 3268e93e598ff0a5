//! MySQL catalog reads.
//!
//! `INFORMATION_SCHEMA` text columns come back as binary strings on some
//! server versions, so every one of them is CAST to CHAR.

use crate::Result;
use crate::adapters::IntrospectionCursor;
use crate::error::ExplorerError;
use crate::models::ColumnDescription;
use async_trait::async_trait;
use sqlx::MySql;
use sqlx::Row;
use sqlx::pool::PoolConnection;

/// Cursor over one pooled MySQL connection.
///
/// The connection goes back to the pool when the cursor is dropped.
pub struct MySqlCursor {
    conn: PoolConnection<MySql>,
}

impl MySqlCursor {
    pub(crate) fn new(conn: PoolConnection<MySql>) -> Self {
        Self { conn }
    }
}

#[async_trait]
impl IntrospectionCursor for MySqlCursor {
    async fn table_names(&mut self) -> Result<Vec<String>> {
        let tables_query = r#"
            SELECT CAST(TABLE_NAME AS CHAR) AS TABLE_NAME
            FROM INFORMATION_SCHEMA.TABLES
            WHERE TABLE_SCHEMA = DATABASE()
            AND TABLE_TYPE = 'BASE TABLE'
            ORDER BY TABLE_NAME
        "#;

        sqlx::query_scalar::<_, String>(tables_query)
            .fetch_all(&mut *self.conn)
            .await
            .map_err(|e| ExplorerError::introspection_failed("Failed to enumerate MySQL tables", e))
    }

    async fn describe_table(&mut self, table_name: &str) -> Result<Vec<ColumnDescription>> {
        let columns_query = r#"
            SELECT
                CAST(c.COLUMN_NAME AS CHAR) AS COLUMN_NAME,
                CAST(c.DATA_TYPE AS CHAR) AS DATA_TYPE,
                CAST(c.COLUMN_TYPE AS CHAR) AS COLUMN_TYPE,
                CAST(c.CHARACTER_MAXIMUM_LENGTH AS SIGNED) AS CHARACTER_MAXIMUM_LENGTH,
                CAST(c.NUMERIC_PRECISION AS SIGNED) AS NUMERIC_PRECISION,
                CAST(c.NUMERIC_SCALE AS SIGNED) AS NUMERIC_SCALE,
                CAST(c.IS_NULLABLE AS CHAR) AS IS_NULLABLE
            FROM INFORMATION_SCHEMA.COLUMNS c
            WHERE c.TABLE_SCHEMA = DATABASE()
            AND c.TABLE_NAME = ?
            ORDER BY c.ORDINAL_POSITION
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
            let name: String = row.try_get("COLUMN_NAME").map_err(|e| {
                ExplorerError::introspection_failed(
                    format!("Failed to parse column name for table '{}'", table_name),
                    e,
                )
            })?;
            let data_type: String = row.try_get("DATA_TYPE").unwrap_or_default();
            let column_type: Option<String> = row.try_get("COLUMN_TYPE").ok();
            let max_length: Option<i64> = row.try_get("CHARACTER_MAXIMUM_LENGTH").unwrap_or(None);
            let precision: Option<i64> = row.try_get("NUMERIC_PRECISION").unwrap_or(None);
            let scale: Option<i64> = row.try_get("NUMERIC_SCALE").unwrap_or(None);
            let is_nullable: String = row.try_get("IS_NULLABLE").unwrap_or_default();

            columns.push(ColumnDescription {
                name,
                type_code: data_type,
                declared_type: column_type,
                max_length: max_length.and_then(|v| u32::try_from(v).ok()),
                precision: precision.and_then(|v| u32::try_from(v).ok()),
                scale: scale.and_then(|v| u32::try_from(v).ok()),
                nullable: is_nullable.eq_ignore_ascii_case("YES"),
            });
        }

        Ok(columns)
    }
}
