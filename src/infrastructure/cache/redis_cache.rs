//! Redis-backed shared cache.

use super::service::{CacheError, CacheProvider, CacheResult};
use async_trait::async_trait;
use redis::{AsyncCommands, Client, aio::ConnectionManager};
use tracing::{debug, info};

/// Shared cache stored in Redis.
///
/// Entries are written without expiry; they live until the propagation worker
/// removes them or Redis evicts them. Unlike the store, operational errors are
/// returned to the caller, which for writes is the cache worker.
pub struct RedisCache {
    client: ConnectionManager,
    key_prefix: String,
}

impl RedisCache {
    /// Connects to Redis and validates the connection with a PING.
    ///
    /// # Errors
    ///
    /// Returns [`CacheError::ConnectionError`] if the URL is invalid, the connection cannot
    /// be established, or the PING health check fails.
    pub async fn connect(redis_url: &str) -> CacheResult<Self> {
        info!("Connecting to Redis");

        let client = Client::open(redis_url).map_err(|e| {
            CacheError::ConnectionError(format!("Failed to create Redis client: {}", e))
        })?;

        let manager = ConnectionManager::new(client).await.map_err(|e| {
            CacheError::ConnectionError(format!("Failed to connect to Redis: {}", e))
        })?;

        let mut test_conn = manager.clone();
        test_conn
            .ping::<()>()
            .await
            .map_err(|e| CacheError::ConnectionError(format!("Redis PING failed: {}", e)))?;

        info!("Connected to Redis");

        Ok(Self {
            client: manager,
            key_prefix: "link:".to_string(),
        })
    }

    /// Constructs the full Redis key with namespace prefix.
    fn build_key(&self, path: &str) -> String {
        format!("{}{}", self.key_prefix, path)
    }
}

#[async_trait]
impl CacheProvider for RedisCache {
    async fn fetch_link(&self, path: &str) -> CacheResult<String> {
        let key = self.build_key(path);
        let mut conn = self.client.clone();

        match conn.get::<_, Option<String>>(&key).await {
            Ok(Some(target)) if !target.is_empty() => {
                debug!(path, "Cache HIT");
                Ok(target)
            }
            Ok(_) => {
                debug!(path, "Cache MISS");
                Err(CacheError::NotFound)
            }
            Err(e) => Err(CacheError::OperationError(format!(
                "Redis GET failed for {}: {}",
                path, e
            ))),
        }
    }

    async fn upsert_link(&self, path: &str, target: &str) -> CacheResult<()> {
        let key = self.build_key(path);
        let mut conn = self.client.clone();

        conn.set::<_, _, ()>(&key, target).await.map_err(|e| {
            CacheError::OperationError(format!("Redis SET failed for {}: {}", path, e))
        })?;

        debug!(path, target, "Cache SET");
        Ok(())
    }

    async fn delete_link(&self, path: &str) -> CacheResult<()> {
        let key = self.build_key(path);
        let mut conn = self.client.clone();

        let deleted = conn.del::<_, i32>(&key).await.map_err(|e| {
            CacheError::OperationError(format!("Redis DEL failed for {}: {}", path, e))
        })?;

        if deleted > 0 {
            debug!(path, "Cache DEL");
        }
        Ok(())
    }

    async fn health_check(&self) -> bool {
        let mut conn = self.client.clone();
        conn.ping::<()>().await.is_ok()
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
