//! PostgreSQL pool setup.

use super::{ConnectionConfig, PostgresAdapter};
use crate::Result;
use crate::adapters::redact_database_url;
use crate::error::ExplorerError;
use sqlx::Executor;
use sqlx::pool::PoolConnection;
use sqlx::postgres::{PgPoolOptions, Postgres};

const DEFAULT_PORT: u16 = 5432;
const SCHEMES: [&str; 2] = ["postgres", "postgresql"];

impl PostgresAdapter {
    /// Builds an adapter whose pool connects on first use.
    ///
    /// An unreachable server therefore surfaces from the first
    /// [`cursor`](crate::adapters::DatabaseAdapter::cursor) or
    /// [`test_connection`](crate::adapters::DatabaseAdapter::test_connection),
    /// not from here.
    ///
    /// Each session is tagged `application_name = dbexplorer-<version>` and
    /// defaults to read-only transactions when the config asks for it.
    ///
    /// # Errors
    /// Returns [`ExplorerError::Configuration`] for a malformed URL.
    pub async fn new(connection_string: &str) -> Result<Self> {
        let config = Self::parse_connection_config(connection_string)?;
        let read_only = config.read_only;

        let pool = PgPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout)
            .test_before_acquire(true)
            .after_connect(move |conn, _meta| {
                Box::pin(async move {
                    let tag = concat!(
                        "SET application_name = 'dbexplorer-",
                        env!("CARGO_PKG_VERSION"),
                        "'"
                    );
                    conn.execute(tag).await?;
                    if read_only {
                        conn.execute("SET default_transaction_read_only = on").await?;
                    }
                    Ok(())
                })
            })
            .connect_lazy(connection_string)
            .map_err(|e| {
                ExplorerError::configuration(format!(
                    "Cannot build PostgreSQL pool for {}: {}",
                    redact_database_url(connection_string),
                    e
                ))
            })?;

        Ok(Self { pool, config })
    }

    /// Checks out one pooled connection; it goes back to the pool on drop.
    ///
    /// # Errors
    /// Returns [`ExplorerError::Connection`] if the server is unreachable or
    /// the acquire timeout elapses.
    pub async fn acquire(&self) -> Result<PoolConnection<Postgres>> {
        self.pool.acquire().await.map_err(|e| {
            ExplorerError::connection_failed(
                format!("Failed to acquire PostgreSQL connection ({})", self.config),
                e,
            )
        })
    }

    /// # Errors
    /// Returns [`ExplorerError::Configuration`] unless the URL is
    /// `postgres://` or `postgresql://` with a host.
    pub fn parse_connection_config(connection_string: &str) -> Result<ConnectionConfig> {
        ConnectionConfig::from_server_url(connection_string, "PostgreSQL", &SCHEMES, DEFAULT_PORT)
    }

    /// # Errors
    /// See [`parse_connection_config`](Self::parse_connection_config).
    pub fn validate_connection_string(connection_string: &str) -> Result<()> {
        Self::parse_connection_config(connection_string).map(|_| ())
    }
}
