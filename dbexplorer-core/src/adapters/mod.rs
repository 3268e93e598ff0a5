//! Database adapter traits and factory for engine-independent introspection.
//!
//! An adapter owns the driver pool for one connection. Catalog reads go
//! through an [`IntrospectionCursor`] checked out with
//! [`DatabaseAdapter::cursor`]; dropping the cursor returns its connection
//! to the pool, whichever way introspection ends.
//!
//! # Module Structure
//! - `config`: Connection configuration
//! - Database-specific modules (postgres, mysql, sqlite), each with its own
//!   `type_mapping` from native type codes to [`FieldType`]

use crate::Result;
use crate::error::{ExplorerError, UnrecognizedType};
use crate::models::{ColumnDescription, DatabaseType, FieldType};
use async_trait::async_trait;

pub mod config;

pub use config::ConnectionConfig;

/// Scoped handle for reading catalog metadata.
///
/// Implementations hold one checked-out driver connection and release it on
/// drop.
#[async_trait]
pub trait IntrospectionCursor: Send {
    /// Lists the tables visible to the connection, in driver order.
    ///
    /// # Errors
    /// Returns [`ExplorerError::Introspection`] if the catalog query fails.
    async fn table_names(&mut self) -> Result<Vec<String>>;

    /// Describes the columns of `table_name`, in ordinal order.
    ///
    /// # Errors
    /// Returns [`ExplorerError::Introspection`] if the catalog query fails.
    async fn describe_table(&mut self, table_name: &str) -> Result<Vec<ColumnDescription>>;
}

/// A live, validated connection to one database.
///
/// # Object Safety
/// This trait is object-safe; resolvers hand out `Box<dyn DatabaseAdapter>`.
#[async_trait]
pub trait DatabaseAdapter: Send + Sync {
    /// Checks that the database is reachable and its catalog readable.
    ///
    /// # Errors
    /// Returns [`ExplorerError::Connection`] if the database cannot be reached.
    async fn test_connection(&self) -> Result<()>;

    /// Checks out a cursor for catalog reads.
    ///
    /// # Errors
    /// Returns [`ExplorerError::Connection`] if no connection can be acquired.
    async fn cursor(&self) -> Result<Box<dyn IntrospectionCursor>>;

    /// Maps a driver-native column description to a normalized type.
    ///
    /// # Errors
    /// Returns [`UnrecognizedType`] when the type code has no known mapping.
    fn map_type(
        &self,
        column: &ColumnDescription,
    ) -> std::result::Result<FieldType, UnrecognizedType>;

    /// Returns the database type this adapter handles.
    fn database_type(&self) -> DatabaseType;

    /// Gets the connection configuration (credentials sanitized).
    fn connection_config(&self) -> ConnectionConfig;
}

pub use crate::error::redact_database_url;

/// URL prefixes that select an engine, checked in order.
const SCHEME_PREFIXES: [(&str, DatabaseType); 4] = [
    ("postgres://", DatabaseType::PostgreSQL),
    ("postgresql://", DatabaseType::PostgreSQL),
    ("mysql://", DatabaseType::MySQL),
    ("sqlite:", DatabaseType::SQLite),
];

/// Bare paths with these extensions are taken as SQLite files.
const SQLITE_FILE_EXTENSIONS: [&str; 3] = [".db", ".sqlite", ".sqlite3"];

/// Opens an adapter for `connection_string`, dispatching on its scheme.
///
/// Networked pools connect lazily, so an unreachable server is only
/// reported once a cursor is requested or
/// [`DatabaseAdapter::test_connection`] runs.
///
/// # Errors
/// [`ExplorerError::Configuration`] if the URL names no known engine or is
/// malformed, [`ExplorerError::UnsupportedFeature`] if the engine was not
/// compiled in.
pub async fn create_adapter(connection_string: &str) -> Result<Box<dyn DatabaseAdapter>> {
    let database_type = detect_database_type(connection_string)?;
    tracing::debug!(
        "Creating {} adapter for {}",
        database_type,
        redact_database_url(connection_string)
    );

    let adapter: Box<dyn DatabaseAdapter> = match database_type {
        #[cfg(feature = "postgresql")]
        DatabaseType::PostgreSQL => {
            Box::new(postgres::PostgresAdapter::new(connection_string).await?)
        }
        #[cfg(feature = "mysql")]
        DatabaseType::MySQL => Box::new(mysql::MySqlAdapter::new(connection_string).await?),
        #[cfg(feature = "sqlite")]
        DatabaseType::SQLite => Box::new(sqlite::SqliteAdapter::new(connection_string).await?),
        #[allow(unreachable_patterns)]
        other => return Err(not_compiled_in(other)),
    };
    Ok(adapter)
}

#[allow(dead_code)]
fn not_compiled_in(database_type: DatabaseType) -> ExplorerError {
    let feature = match database_type {
        DatabaseType::PostgreSQL => "postgresql",
        DatabaseType::MySQL => "mysql",
        DatabaseType::SQLite => "sqlite",
    };
    ExplorerError::unsupported_feature(
        format!("{} adapter", database_type),
        format!("Compile with --features {} to enable it", feature),
    )
}

/// Works out which engine a connection string targets.
///
/// # Errors
/// Returns [`ExplorerError::Configuration`] for unrecognized formats.
pub fn detect_database_type(connection_string: &str) -> Result<DatabaseType> {
    let by_scheme = SCHEME_PREFIXES
        .iter()
        .find(|(prefix, _)| connection_string.starts_with(prefix))
        .map(|(_, database_type)| *database_type);

    let is_sqlite_path = connection_string == ":memory:"
        || (!connection_string.contains("://")
            && SQLITE_FILE_EXTENSIONS
                .iter()
                .any(|ext| connection_string.ends_with(ext)));

    by_scheme
        .or(is_sqlite_path.then_some(DatabaseType::SQLite))
        .ok_or_else(|| {
            ExplorerError::configuration("Unrecognized database connection string format")
        })
}

/// Splits a declared type such as `VARCHAR(255)` or `NUMERIC(10, 2)` into
/// its base name and the numbers in parentheses.
pub(crate) fn split_type_arguments(declared: &str) -> (&str, Vec<u32>) {
    let trimmed = declared.trim();
    let Some((base, rest)) = trimmed.split_once('(') else {
        return (trimmed, Vec::new());
    };
    let args = rest
        .trim_end_matches(')')
        .split(',')
        .filter_map(|part| part.trim().parse::<u32>().ok())
        .collect();
    (base.trim_end(), args)
}

#[cfg(feature = "postgresql")]
pub mod postgres;

#[cfg(feature = "mysql")]
pub mod mysql;

#[cfg(feature = "sqlite")]
pub mod sqlite;
