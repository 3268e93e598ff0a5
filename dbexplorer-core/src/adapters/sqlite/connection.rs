//! Opening SQLite databases.
//!
//! Accepted locations are `sqlite://` URLs (including `sqlite::memory:` and
//! `?mode=memory`), bare `:memory:`, and bare paths ending in `.db`,
//! `.sqlite` or `.sqlite3`.

use super::{ConnectionConfig, SqliteAdapter};
use crate::Result;
use crate::error::ExplorerError;
use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

const FILE_EXTENSIONS: [&str; 3] = [".db", ".sqlite", ".sqlite3"];

/// A recognized SQLite location, normalized to a URL sqlx accepts.
#[derive(Debug, Clone, PartialEq, Eq)]
enum SqliteLocation {
    Memory(String),
    File(String),
}

impl SqliteLocation {
    fn parse(connection_string: &str) -> Result<Self> {
        if connection_string == ":memory:" {
            return Ok(Self::Memory("sqlite::memory:".to_string()));
        }

        if let Some(rest) = connection_string.strip_prefix("sqlite:") {
            if is_memory(connection_string) {
                return Ok(Self::Memory(connection_string.to_string()));
            }
            // `sqlite:` alone or `sqlite:x` without slashes names nothing
            if rest.starts_with("//") && rest.len() > 2 {
                return Ok(Self::File(connection_string.to_string()));
            }
        } else if !connection_string.contains("://")
            && FILE_EXTENSIONS
                .iter()
                .any(|ext| connection_string.ends_with(ext))
        {
            return Ok(Self::File(format!("sqlite://{}", connection_string)));
        }

        Err(ExplorerError::configuration(
            "Invalid SQLite connection string format: expected sqlite:// URL, file path, or :memory:",
        ))
    }

    fn url(&self) -> &str {
        match self {
            Self::Memory(url) | Self::File(url) => url,
        }
    }

    /// File name shown as the config's database; memory DBs report `:memory:`.
    fn database_name(&self) -> String {
        match self {
            Self::Memory(_) => ":memory:".to_string(),
            Self::File(url) => {
                let path = url.trim_start_matches("sqlite://");
                let path = path.split_once('?').map_or(path, |(p, _)| p);
                path.rsplit('/')
                    .find(|segment| !segment.is_empty())
                    .unwrap_or("main")
                    .to_string()
            }
        }
    }
}

fn is_memory(connection_string: &str) -> bool {
    connection_string.contains(":memory:") || connection_string.contains("mode=memory")
}

fn sqlite_config(database: String) -> ConnectionConfig {
    ConnectionConfig {
        port: None,
        max_connections: 1,
        ..ConnectionConfig::new("localhost")
    }
    .with_database(database)
}

impl SqliteAdapter {
    /// Opens a single-connection pool for `connection_string`.
    ///
    /// Files are opened read-only. In-memory databases are opened
    /// read-write since they start out empty.
    ///
    /// # Errors
    /// [`ExplorerError::Configuration`] for an unrecognized location,
    /// [`ExplorerError::Connection`] if the database cannot be opened.
    pub async fn new(connection_string: &str) -> Result<Self> {
        let location = SqliteLocation::parse(connection_string)?;
        let config = sqlite_config(location.database_name());

        let mut options = SqliteConnectOptions::from_str(location.url()).map_err(|e| {
            ExplorerError::configuration(format!("Invalid SQLite connection string: {}", e))
        })?;
        if config.read_only && matches!(location, SqliteLocation::File(_)) {
            options = options.read_only(true);
        }

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.connect_timeout)
            .connect_with(options)
            .await
            .map_err(|e| ExplorerError::connection_failed("Failed to open SQLite database", e))?;

        Ok(Self {
            pool,
            config,
            connection_string: connection_string.to_string(),
        })
    }

    /// Wraps a pool the caller already opened (and possibly populated).
    pub fn from_pool(pool: SqlitePool, connection_string: &str) -> Self {
        let database = SqliteLocation::parse(connection_string)
            .map(|location| location.database_name())
            .unwrap_or_else(|_| "main".to_string());

        Self {
            pool,
            config: sqlite_config(database),
            connection_string: connection_string.to_string(),
        }
    }

    pub fn is_in_memory(&self) -> bool {
        is_memory(&self.connection_string)
    }
}

/// Checks that `connection_string` names a SQLite database and returns the
/// pool settings that would be used for it.
///
/// # Errors
/// Returns [`ExplorerError::Configuration`] for anything else.
pub fn parse_sqlite_connection_config(connection_string: &str) -> Result<ConnectionConfig> {
    SqliteLocation::parse(connection_string).map(|location| sqlite_config(location.database_name()))
}
