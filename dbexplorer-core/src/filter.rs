//! Table inclusion/exclusion by name prefix.
//!
//! An include list, when present, takes precedence: the exclude list is not
//! consulted at all. Without an include list every table is eligible unless
//! it matches an exclude prefix.
//!
//! Configuration is read through [`FilterConfigProvider`] on every
//! evaluation, so a [`SharedFilterConfig`] updated at runtime is honored by
//! the next introspection run.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, PoisonError, RwLock};

/// Prefix lists controlling which tables are introspected.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// When `Some`, only tables starting with one of these prefixes are kept
    pub include_prefixes: Option<Vec<String>>,
    /// Consulted only when `include_prefixes` is `None`
    pub exclude_prefixes: Option<Vec<String>>,
}

impl FilterConfig {
    /// Config that keeps only tables matching one of `prefixes`.
    pub fn including<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            include_prefixes: Some(prefixes.into_iter().map(Into::into).collect()),
            exclude_prefixes: None,
        }
    }

    /// Config that drops tables matching one of `prefixes`.
    pub fn excluding<I, S>(prefixes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            include_prefixes: None,
            exclude_prefixes: Some(prefixes.into_iter().map(Into::into).collect()),
        }
    }
}

/// Decides whether `table_name` is eligible for introspection.
///
/// # Example
/// ```rust
/// use dbexplorer_core::filter::{FilterConfig, include_table};
///
/// let config = FilterConfig::excluding(["auth_"]);
/// assert!(!include_table("auth_user", &config));
/// assert!(include_table("shop_order", &config));
/// ```
pub fn include_table(table_name: &str, config: &FilterConfig) -> bool {
    if let Some(includes) = &config.include_prefixes {
        return includes.iter().any(|p| table_name.starts_with(p.as_str()));
    }

    !config
        .exclude_prefixes
        .iter()
        .flatten()
        .any(|p| table_name.starts_with(p.as_str()))
}

/// Source of the filter configuration, consulted per table.
pub trait FilterConfigProvider: Send + Sync {
    /// Returns the configuration currently in effect.
    fn filter_config(&self) -> FilterConfig;
}

impl FilterConfigProvider for FilterConfig {
    fn filter_config(&self) -> FilterConfig {
        self.clone()
    }
}

impl<F> FilterConfigProvider for F
where
    F: Fn() -> FilterConfig + Send + Sync,
{
    fn filter_config(&self) -> FilterConfig {
        self()
    }
}

/// Filter configuration that can be replaced while the process is running.
///
/// Clones share the same underlying configuration.
#[derive(Debug, Clone, Default)]
pub struct SharedFilterConfig {
    inner: Arc<RwLock<FilterConfig>>,
}

impl SharedFilterConfig {
    /// Creates a handle holding `config`.
    pub fn new(config: FilterConfig) -> Self {
        Self {
            inner: Arc::new(RwLock::new(config)),
        }
    }

    /// Replaces the configuration; later evaluations see the new value.
    pub fn replace(&self, config: FilterConfig) {
        let mut guard = self.inner.write().unwrap_or_else(PoisonError::into_inner);
        *guard = config;
    }
}

impl FilterConfigProvider for SharedFilterConfig {
    fn filter_config(&self) -> FilterConfig {
        self.inner
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}
