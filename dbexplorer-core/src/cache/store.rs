//! Key-value storage for introspected schemas.

use crate::models::SchemaInfo;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Default lifetime of a cached schema.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(300);

/// Generic get/set store the schema cache writes through.
///
/// Implementations own expiry and eviction and must be safe to share
/// between concurrent callers.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Returns the stored value, or `None` if absent or expired.
    async fn get(&self, key: &str) -> Option<SchemaInfo>;

    /// Stores `value` under `key` with the store's default lifetime.
    async fn set(&self, key: &str, value: SchemaInfo);

    /// Removes `key`, if present.
    async fn delete(&self, key: &str);
}

#[derive(Debug, Clone)]
struct CachedSchema {
    schema: SchemaInfo,
    cached_at: Instant,
}

impl CachedSchema {
    fn new(schema: SchemaInfo) -> Self {
        Self {
            schema,
            cached_at: Instant::now(),
        }
    }

    fn is_expired(&self, ttl: Duration) -> bool {
        self.cached_at.elapsed() > ttl
    }
}

/// In-process [`CacheStore`] with a fixed time-to-live.
///
/// Expired entries are ignored on read and dropped on the next write to
/// the same key or by [`MemoryCacheStore::purge_expired`]. Clones share
/// storage.
#[derive(Debug, Clone)]
pub struct MemoryCacheStore {
    entries: Arc<RwLock<HashMap<String, CachedSchema>>>,
    ttl: Duration,
}

impl MemoryCacheStore {
    /// Creates an empty store with [`DEFAULT_CACHE_TTL`].
    pub fn new() -> Self {
        Self::with_ttl(DEFAULT_CACHE_TTL)
    }

    /// Creates an empty store with a custom TTL.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            entries: Arc::new(RwLock::new(HashMap::new())),
            ttl,
        }
    }

    /// Number of stored entries, including expired ones not yet purged.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// True when nothing is stored.
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Drops every expired entry, returning how many were removed.
    pub async fn purge_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired(self.ttl));
        before.saturating_sub(entries.len())
    }

    /// Removes every entry.
    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }
}

impl Default for MemoryCacheStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &str) -> Option<SchemaInfo> {
        let entries = self.entries.read().await;
        entries
            .get(key)
            .filter(|entry| !entry.is_expired(self.ttl))
            .map(|entry| entry.schema.clone())
    }

    async fn set(&self, key: &str, value: SchemaInfo) {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_string(), CachedSchema::new(value));
    }

    async fn delete(&self, key: &str) {
        self.entries.write().await.remove(key);
    }
}
