//! Schema introspection and per-connection schema caching.
//!
//! Given a connection alias, [`SchemaCache::get_schema`] returns the tables
//! and columns of that database with driver-independent type labels,
//! querying the system catalogs only when the cache has nothing usable.
//!
//! # Architecture
//! - [`filter`]: prefix-based table inclusion and exclusion
//! - [`adapters`]: per-engine catalog access and type mapping
//! - [`introspect`]: builds a [`SchemaInfo`] from a live adapter
//! - [`cache`]: the per-connection cache in front of introspection
//! - [`connections`]: alias resolution to validated adapters
//!
//! # Example
//! ```rust,no_run
//! use dbexplorer_core::{
//!     ConnectionRegistry, FilterConfig, MemoryCacheStore, SchemaCache,
//! };
//! use std::sync::Arc;
//!
//! # async fn example() -> dbexplorer_core::Result<()> {
//! let registry = ConnectionRegistry::new().with_connection("main", "sqlite://./app.db");
//! let cache = SchemaCache::new(
//!     Arc::new(registry),
//!     Arc::new(MemoryCacheStore::new()),
//!     Arc::new(FilterConfig::excluding(["sqlite_stat"])),
//! );
//!
//! let schema = cache.get_schema("main").await?;
//! for table in schema.tables() {
//!     println!("{}: {} columns", table.table_name, table.columns.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod adapters;
pub mod cache;
pub mod connections;
pub mod error;
pub mod filter;
pub mod introspect;
pub mod logging;
pub mod models;
pub mod settings;

// Re-export commonly used types
pub use adapters::{ConnectionConfig, DatabaseAdapter, IntrospectionCursor, create_adapter};
pub use cache::{CacheStore, MemoryCacheStore, SchemaCache, cache_key};
pub use connections::{ConnectionRegistry, ConnectionResolver};
pub use error::{ExplorerError, Result, UnrecognizedType};
pub use filter::{FilterConfig, FilterConfigProvider, SharedFilterConfig, include_table};
pub use introspect::introspect;
pub use logging::init_logging;
pub use models::{
    ColumnDescription, ColumnInfo, DatabaseType, FieldType, SchemaInfo, TableSchema,
    UNKNOWN_FIELD_TYPE,
};
pub use settings::ExplorerSettings;
