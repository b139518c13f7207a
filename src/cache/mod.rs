//! Result cache
//!
//! Memoizes presentation-ready ranking and search results. Every key embeds
//! the catalog version it was computed from (see [`versioned_key`]), so a
//! result computed from an older snapshot is never returned for a newer one;
//! old versions are purged with [`version_pattern`] after a reload.
//!
//! # Usage
//!
//! ```rust,ignore
//! use pencraft::cache::{create_cache, versioned_key, CacheLayer};
//! use pencraft::config::CacheConfig;
//!
//! let cache = create_cache(&CacheConfig::default());
//! cache.set(&versioned_key("search", 3, "rust"), &response).await?;
//! ```

pub mod memory;

use anyhow::Result;
use async_trait::async_trait;
use serde::{de::DeserializeOwned, Serialize};
use std::sync::Arc;
use std::time::Duration;

use crate::config::CacheConfig;

pub use memory::MemoryCache;

/// Cache layer trait
///
/// The methods are generic over the stored type, so this trait cannot be used
/// as a trait object; hold the concrete cache instead.
#[async_trait]
pub trait CacheLayer: Send + Sync {
    /// Get a value from cache
    async fn get<T: DeserializeOwned + Send>(&self, key: &str) -> Result<Option<T>>;

    /// Store a value; it expires after the cache-wide TTL
    async fn set<T: Serialize + Send + Sync>(&self, key: &str, value: &T) -> Result<()>;

    /// Delete a value from cache
    async fn delete(&self, key: &str) -> Result<()>;

    /// Delete all values whose key matches a glob pattern
    async fn delete_pattern(&self, pattern: &str) -> Result<()>;

    /// Clear all cache entries
    async fn clear(&self) -> Result<()>;
}

/// Key for a result of `kind` computed from catalog `version`
pub fn versioned_key(kind: &str, version: u64, detail: &str) -> String {
    format!("{}:v{}:{}", kind, version, detail)
}

/// Glob matching every key computed from catalog `version`
pub fn version_pattern(version: u64) -> String {
    format!("*:v{}:*", version)
}

/// Create the result cache from configuration
pub fn create_cache(config: &CacheConfig) -> Arc<MemoryCache> {
    let ttl = Duration::from_secs(config.ttl_seconds);
    Arc::new(MemoryCache::with_capacity_and_ttl(config.max_capacity, ttl))
}
