//! Caching layer for fast redirect lookups.
//!
//! Provides a [`CacheProvider`] trait with two implementations:
//! - [`LocalCache`] - Embedded moka cache with time-based eviction
//! - [`RedisCache`] - Shared Redis cache with no default expiry

mod local_cache;
mod redis_cache;
mod service;

pub use local_cache::LocalCache;
pub use redis_cache::RedisCache;
pub use service::{CacheError, CacheProvider, CacheResult};

#[cfg(test)]
pub use service::MockCacheProvider;
