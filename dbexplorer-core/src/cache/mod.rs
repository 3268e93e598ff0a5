//! Per-connection schema cache.
//!
//! [`SchemaCache::get_schema`] answers from the [`CacheStore`] when it can and
//! otherwise resolves the connection, introspects it, and stores the result
//! under [`cache_key`].
//!
//! # Empty schemas
//! A cached schema with no tables counts as a miss. An empty result is
//! stored like any other, but the next call introspects again, so an empty
//! schema never sticks.
//!
//! # Concurrency
//! There is no single-flight guard. Two concurrent misses for the same alias
//! both introspect and both write; the last write wins.
//!
//! # Invalidation
//! The cache has no invalidation method of its own. Delete
//! `cache_key(alias)` from the store to force the next call to introspect.

mod store;

pub use store::{CacheStore, DEFAULT_CACHE_TTL, MemoryCacheStore};

use crate::Result;
use crate::connections::ConnectionResolver;
use crate::filter::FilterConfigProvider;
use crate::introspect::introspect;
use crate::models::SchemaInfo;
use std::sync::Arc;

const CACHE_KEY_PREFIX: &str = "dbexplorer:schema:";

/// Returns the store key for `connection_alias`.
///
/// Distinct aliases always produce distinct keys.
///
/// # Example
/// ```rust
/// use dbexplorer_core::cache::cache_key;
///
/// assert_eq!(cache_key("analytics"), "dbexplorer:schema:analytics");
/// assert_ne!(cache_key("alias_a"), cache_key("alias_b"));
/// ```
pub fn cache_key(connection_alias: &str) -> String {
    format!("{}{}", CACHE_KEY_PREFIX, connection_alias)
}

/// Schema introspection with a per-connection cache in front.
///
/// Cheap to clone; clones share the resolver, store and filter.
#[derive(Clone)]
pub struct SchemaCache {
    resolver: Arc<dyn ConnectionResolver>,
    store: Arc<dyn CacheStore>,
    filter: Arc<dyn FilterConfigProvider>,
}

impl std::fmt::Debug for SchemaCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SchemaCache").finish_non_exhaustive()
    }
}

impl SchemaCache {
    /// Creates a cache over the given collaborators.
    pub fn new(
        resolver: Arc<dyn ConnectionResolver>,
        store: Arc<dyn CacheStore>,
        filter: Arc<dyn FilterConfigProvider>,
    ) -> Self {
        Self {
            resolver,
            store,
            filter,
        }
    }

    /// Returns the schema for `connection_alias`, introspecting on a miss.
    ///
    /// # Errors
    /// Resolver and introspection errors propagate unchanged and leave the
    /// store untouched.
    pub async fn get_schema(&self, connection_alias: &str) -> Result<SchemaInfo> {
        let key = cache_key(connection_alias);

        if let Some(schema) = self.store.get(&key).await
            && !schema.is_empty()
        {
            tracing::debug!(
                "Schema cache hit for '{}' ({} tables)",
                connection_alias,
                schema.len()
            );
            return Ok(schema);
        }

        tracing::debug!("Schema cache miss for '{}'", connection_alias);

        let adapter = self.resolver.resolve(connection_alias).await?;
        let schema = introspect(adapter.as_ref(), self.filter.as_ref()).await?;

        if schema.is_empty() {
            tracing::warn!(
                "No tables passed the filter for '{}'; the empty schema will be recomputed on the next request",
                connection_alias
            );
        }

        self.store.set(&key, schema.clone()).await;
        Ok(schema)
    }
}
