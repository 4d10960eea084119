//! Embedded in-process cache with time-based eviction.

use super::service::{CacheError, CacheProvider, CacheResult};
use async_trait::async_trait;
use moka::future::Cache;
use std::time::Duration;
use tracing::debug;

/// In-process cache backed by `moka`.
///
/// Every entry expires `ttl` after it was last written. The entry count is
/// bounded; once full, moka evicts according to its admission policy.
#[derive(Clone)]
pub struct LocalCache {
    cache: Cache<String, String>,
}

impl LocalCache {
    /// Creates a cache whose entries live for `ttl` and which holds at most
    /// `max_entries` mappings.
    pub fn new(ttl: Duration, max_entries: u64) -> Self {
        Self {
            cache: Cache::builder()
                .max_capacity(max_entries)
                .time_to_live(ttl)
                .build(),
        }
    }

    /// Applies pending evictions. Only needed when observing entry counts.
    #[cfg(test)]
    pub async fn sync(&self) {
        self.cache.run_pending_tasks().await;
    }

    /// Number of entries currently held, after [`LocalCache::sync`].
    #[cfg(test)]
    pub fn entry_count(&self) -> u64 {
        self.cache.entry_count()
    }
}

#[async_trait]
impl CacheProvider for LocalCache {
    async fn fetch_link(&self, path: &str) -> CacheResult<String> {
        match self.cache.get(path).await {
            Some(target) if !target.is_empty() => Ok(target),
            _ => {
                debug!(path, "Local cache MISS");
                Err(CacheError::NotFound)
            }
        }
    }

    async fn upsert_link(&self, path: &str, target: &str) -> CacheResult<()> {
        self.cache.insert(path.to_string(), target.to_string()).await;
        Ok(())
    }

    async fn delete_link(&self, path: &str) -> CacheResult<()> {
        self.cache.invalidate(path).await;
        Ok(())
    }

    async fn health_check(&self) -> bool {
        true
    }

    fn backend_name(&self) -> &'static str {
        "local"
    }
}
