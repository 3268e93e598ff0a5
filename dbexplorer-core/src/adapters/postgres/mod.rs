//! PostgreSQL database adapter.
//!
//! # Module Structure
//! - `connection`: Connection pool creation and connection string validation
//! - `cursor`: Table enumeration via `pg_class`, columns via `information_schema`
//! - `type_mapping`: `udt_name` to [`FieldType`]
//!
//! Only tables visible on the session `search_path` are introspected, the
//! same set an unqualified `SELECT * FROM name` would resolve against.

mod connection;
mod cursor;
mod type_mapping;


use super::{ConnectionConfig, DatabaseAdapter, IntrospectionCursor};
use crate::Result;
use crate::error::{ExplorerError, UnrecognizedType};
use crate::models::{ColumnDescription, DatabaseType, FieldType};
use async_trait::async_trait;
use sqlx::PgPool;

pub use cursor::PostgresCursor;
pub use type_mapping::map_postgresql_type;

/// PostgreSQL database adapter over a lazily connected pool.
pub struct PostgresAdapter {
    pub pool: PgPool,
    pub config: ConnectionConfig,
}

impl std::fmt::Debug for PostgresAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PostgresAdapter")
            .field("config", &self.config)
            .field("pool_size", &self.pool.size())
            .field("pool_idle", &self.pool.num_idle())
            .finish()
    }
}

#[async_trait]
impl DatabaseAdapter for PostgresAdapter {
    async fn test_connection(&self) -> Result<()> {
        let connectivity_result: i32 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                ExplorerError::connection_failed("PostgreSQL connectivity check failed", e)
            })?;

        if connectivity_result != 1 {
            return Err(ExplorerError::configuration(
                "Basic connectivity test failed: unexpected result",
            ));
        }

        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM information_schema.tables WHERE table_schema = 'information_schema'",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(|e| ExplorerError::connection_failed("Cannot access information_schema", e))?;

        Ok(())
    }

    async fn cursor(&self) -> Result<Box<dyn IntrospectionCursor>> {
        let conn = self.acquire().await?;
        Ok(Box::new(PostgresCursor::new(conn)))
    }

    fn map_type(
        &self,
        column: &ColumnDescription,
    ) -> std::result::Result<FieldType, UnrecognizedType> {
        map_postgresql_type(&column.type_code)
    }

    fn database_type(&self) -> DatabaseType {
        DatabaseType::PostgreSQL
    }

    fn connection_config(&self) -> ConnectionConfig {
        self.config.clone()
    }
}
