//! MySQL pool setup.

use super::{ConnectionConfig, MySqlAdapter};
use crate::Result;
use crate::adapters::redact_database_url;
use crate::error::ExplorerError;
use sqlx::Executor;
use sqlx::mysql::MySqlPoolOptions;

const DEFAULT_PORT: u16 = 3306;

impl MySqlAdapter {
    /// Builds an adapter whose pool connects on first use.
    ///
    /// # Errors
    /// Returns [`ExplorerError::Configuration`] for a malformed URL.
    pub async fn new(connection_string: &str) -> Result<Self> {
        let config = parse_mysql_connection_config(connection_string)?;
        let read_only = config.read_only;

        let pool = MySqlPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout)
            .test_before_acquire(true)
            .after_connect(move |conn, _meta| {
                Box::pin(async move {
                    if read_only {
                        conn.execute("SET SESSION TRANSACTION READ ONLY").await?;
                    }
                    Ok(())
                })
            })
            .connect_lazy(connection_string)
            .map_err(|e| {
                ExplorerError::configuration(format!(
                    "Cannot build MySQL pool for {}: {}",
                    redact_database_url(connection_string),
                    e
                ))
            })?;

        Ok(Self { pool, config })
    }
}

/// # Errors
/// Returns [`ExplorerError::Configuration`] unless the URL is `mysql://`
/// with a host.
pub fn parse_mysql_connection_config(connection_string: &str) -> Result<ConnectionConfig> {
    ConnectionConfig::from_server_url(connection_string, "MySQL", &["mysql"], DEFAULT_PORT)
}

/// Scheme and host check without keeping the parsed config.
///
/// # Errors
/// See [`parse_mysql_connection_config`].
pub fn validate_mysql_connection_string(connection_string: &str) -> Result<()> {
    parse_mysql_connection_config(connection_string).map(|_| ())
}
