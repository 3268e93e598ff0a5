//! Resolution of connection aliases to live, validated adapters.

use crate::Result;
use crate::adapters::{DatabaseAdapter, create_adapter, redact_database_url};
use crate::error::ExplorerError;
use crate::settings::ExplorerSettings;
use async_trait::async_trait;
use std::collections::BTreeMap;

/// Turns a logical connection alias into a usable adapter.
#[async_trait]
pub trait ConnectionResolver: Send + Sync {
    /// Returns a validated adapter for `alias`.
    ///
    /// # Errors
    /// Returns [`ExplorerError::Connection`] if the alias is unknown or the
    /// database cannot be reached.
    async fn resolve(&self, alias: &str) -> Result<Box<dyn DatabaseAdapter>>;
}

/// Alias to connection URL table backed by [`ExplorerSettings`].
///
/// Each call to [`ConnectionResolver::resolve`] opens a fresh adapter and
/// checks it with [`DatabaseAdapter::test_connection`] before handing it out.
#[derive(Clone, Default)]
pub struct ConnectionRegistry {
    connections: BTreeMap<String, String>,
}

impl std::fmt::Debug for ConnectionRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redacted: BTreeMap<&str, String> = self
            .connections
            .iter()
            .map(|(alias, url)| (alias.as_str(), redact_database_url(url)))
            .collect();
        f.debug_struct("ConnectionRegistry")
            .field("connections", &redacted)
            .finish()
    }
}

impl ConnectionRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from the `connections` table of `settings`.
    pub fn from_settings(settings: &ExplorerSettings) -> Self {
        Self {
            connections: settings.connections.clone(),
        }
    }

    /// Adds or replaces an alias.
    pub fn with_connection(mut self, alias: impl Into<String>, url: impl Into<String>) -> Self {
        self.connections.insert(alias.into(), url.into());
        self
    }

    /// Configured aliases, sorted.
    pub fn aliases(&self) -> impl Iterator<Item = &str> {
        self.connections.keys().map(String::as_str)
    }

    /// The raw connection URL for `alias`. Redact before displaying it.
    pub fn url(&self, alias: &str) -> Option<&str> {
        self.connections.get(alias).map(String::as_str)
    }

    /// Number of configured aliases.
    pub fn len(&self) -> usize {
        self.connections.len()
    }

    /// True when no alias is configured.
    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

#[async_trait]
impl ConnectionResolver for ConnectionRegistry {
    async fn resolve(&self, alias: &str) -> Result<Box<dyn DatabaseAdapter>> {
        let url = self
            .url(alias)
            .ok_or_else(|| ExplorerError::invalid_alias(alias))?;

        tracing::debug!(
            "Resolving connection '{}' to {}",
            alias,
            redact_database_url(url)
        );

        let adapter = create_adapter(url).await?;
        adapter.test_connection().await?;

        tracing::debug!(
            "Connection '{}' validated ({} at {})",
            alias,
            adapter.database_type(),
            adapter.connection_config()
        );

        Ok(adapter)
    }
}
