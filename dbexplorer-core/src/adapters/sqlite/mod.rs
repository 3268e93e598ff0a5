//! SQLite database adapter.
//!
//! # Module Structure
//! - `connection`: Connection string handling and pool creation
//! - `cursor`: Catalog reads via `sqlite_master` and `PRAGMA table_info`
//! - `type_mapping`: SQLite declared types to [`FieldType`]
//!
//! SQLite is file based, so the pool is kept to a single connection. That
//! also keeps `sqlite::memory:` databases stable: every pooled connection to
//! an in-memory URL would otherwise see its own empty database.

pub mod connection;
pub mod cursor;
pub mod type_mapping;


use super::{ConnectionConfig, DatabaseAdapter, IntrospectionCursor};
use crate::Result;
use crate::error::{ExplorerError, UnrecognizedType};
use crate::models::{ColumnDescription, DatabaseType, FieldType};
use async_trait::async_trait;
use sqlx::SqlitePool;

pub use cursor::SqliteCursor;
pub use type_mapping::map_sqlite_type;

/// SQLite database adapter.
pub struct SqliteAdapter {
    /// Connection pool (single connection)
    pub pool: SqlitePool,
    /// Connection configuration
    pub config: ConnectionConfig,
    /// Original connection string, kept to tell in-memory from file databases
    pub connection_string: String,
}

impl std::fmt::Debug for SqliteAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteAdapter")
            .field("config", &self.config)
            .field("is_in_memory", &self.is_in_memory())
            .finish_non_exhaustive()
    }
}

#[async_trait]
impl DatabaseAdapter for SqliteAdapter {
    async fn test_connection(&self) -> Result<()> {
        let connectivity_result: i32 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ExplorerError::connection_failed("SQLite connectivity check failed", e))?;

        if connectivity_result != 1 {
            return Err(ExplorerError::configuration(
                "Basic connectivity test failed: unexpected result",
            ));
        }

        // Schema introspection reads sqlite_master
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM sqlite_master")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ExplorerError::connection_failed("Cannot access sqlite_master", e))?;

        Ok(())
    }

    async fn cursor(&self) -> Result<Box<dyn IntrospectionCursor>> {
        let conn = self.pool.acquire().await.map_err(|e| {
            ExplorerError::connection_failed("Failed to acquire SQLite connection", e)
        })?;
        Ok(Box::new(SqliteCursor::new(conn)))
    }

    fn map_type(
        &self,
        column: &ColumnDescription,
    ) -> std::result::Result<FieldType, UnrecognizedType> {
        map_sqlite_type(&column.type_code)
    }

    fn database_type(&self) -> DatabaseType {
        DatabaseType::SQLite
    }

    fn connection_config(&self) -> ConnectionConfig {
        self.config.clone()
    }
}
