//! MySQL database adapter.
//!
//! # Module Structure
//! - `connection`: Connection pool creation and connection string validation
//! - `cursor`: Catalog reads via `INFORMATION_SCHEMA` for the current database
//! - `type_mapping`: `DATA_TYPE` to [`FieldType`]

mod connection;
mod cursor;
mod type_mapping;


use super::{ConnectionConfig, DatabaseAdapter, IntrospectionCursor};
use crate::Result;
use crate::error::{ExplorerError, UnrecognizedType};
use crate::models::{ColumnDescription, DatabaseType, FieldType};
use async_trait::async_trait;
use sqlx::MySqlPool;

pub use cursor::MySqlCursor;
pub use type_mapping::map_mysql_type;

/// MySQL database adapter over a lazily connected pool.
pub struct MySqlAdapter {
    pub pool: MySqlPool,
    pub config: ConnectionConfig,
}

impl std::fmt::Debug for MySqlAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MySqlAdapter")
            .field("config", &self.config)
            .field("pool_size", &self.pool.size())
            .finish()
    }
}

#[async_trait]
impl DatabaseAdapter for MySqlAdapter {
    async fn test_connection(&self) -> Result<()> {
        let connectivity_result: i64 = sqlx::query_scalar("SELECT 1")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ExplorerError::connection_failed("MySQL connectivity check failed", e))?;

        if connectivity_result != 1 {
            return Err(ExplorerError::configuration(
                "Basic connectivity test failed: unexpected result",
            ));
        }

        // Introspection is scoped to DATABASE(); without one there is nothing to read
        let database: Option<String> = sqlx::query_scalar("SELECT DATABASE()")
            .fetch_one(&self.pool)
            .await
            .map_err(|e| ExplorerError::connection_failed("Cannot determine current database", e))?;

        if database.is_none() {
            return Err(ExplorerError::configuration(
                "MySQL connection string must name a database",
            ));
        }

        Ok(())
    }

    async fn cursor(&self) -> Result<Box<dyn IntrospectionCursor>> {
        let conn = self.pool.acquire().await.map_err(|e| {
            ExplorerError::connection_failed(
                format!("Failed to acquire MySQL connection ({})", self.config),
                e,
            )
        })?;
        Ok(Box::new(MySqlCursor::new(conn)))
    }

    fn map_type(
        &self,
        column: &ColumnDescription,
    ) -> std::result::Result<FieldType, UnrecognizedType> {
        map_mysql_type(&column.type_code, column.declared_type.as_deref())
    }

    fn database_type(&self) -> DatabaseType {
        DatabaseType::MySQL
    }

    fn connection_config(&self) -> ConnectionConfig {
        self.config.clone()
    }
}
