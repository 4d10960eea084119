//! Cache provider trait and error types.

use async_trait::async_trait;
use std::fmt;

/// Errors that can occur during cache operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheError {
    /// The key was never set, has expired, or was evicted.
    NotFound,
    ConnectionError(String),
    OperationError(String),
}

impl fmt::Display for CacheError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::NotFound => write!(f, "Cache entry not found"),
            Self::ConnectionError(e) => write!(f, "Cache connection error: {}", e),
            Self::OperationError(e) => write!(f, "Cache operation error: {}", e),
        }
    }
}

impl std::error::Error for CacheError {}

/// Result type for cache operations.
pub type CacheResult<T> = Result<T, CacheError>;

/// Fast, non-authoritative `path → target_url` lookup.
///
/// The cache never consults the store and may drop any entry at any time.
/// Writers are expected to go through the propagation queue so that the cache
/// observes mutations in the order they were committed.
///
/// # Implementations
///
/// - [`crate::infrastructure::cache::LocalCache`] - Embedded cache with time-based eviction
/// - [`crate::infrastructure::cache::RedisCache`] - Shared Redis cache without expiry
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CacheProvider: Send + Sync {
    /// Looks up the target URL for `path`.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::NotFound`] when there is no usable entry. Missing,
    /// expired, evicted and empty entries are indistinguishable.
    async fn fetch_link(&self, path: &str) -> CacheResult<String>;

    /// Inserts or replaces the mapping for `path`.
    ///
    /// # Errors
    ///
    /// Returns an error only on operational failures.
    async fn upsert_link(&self, path: &str, target: &str) -> CacheResult<()>;

    /// Removes the mapping for `path`. Removing an absent key succeeds.
    ///
    /// # Errors
    ///
    /// Returns an error only on operational failures.
    async fn delete_link(&self, path: &str) -> CacheResult<()>;

    /// Checks if the cache backend is healthy.
    async fn health_check(&self) -> bool;

    /// Short backend name used in health reports.
    fn backend_name(&self) -> &'static str;
}
