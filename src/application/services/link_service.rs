//! Link registry service: store commits followed by cache propagation.

use std::sync::Arc;
use tracing::{debug, warn};

use crate::domain::cache_task::CacheTask;
use crate::domain::cache_worker::CacheTaskQueue;
use crate::domain::entities::LinkRecord;
use crate::domain::errors::{LinkError, QueueError};
use crate::domain::repositories::LinkRepository;
use crate::infrastructure::cache::{CacheError, CacheProvider};

/// Errors returned by [`LinkService`] operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ServiceError {
    #[error(transparent)]
    Store(#[from] LinkError),

    /// The store write committed but the cache task could not be queued.
    #[error(transparent)]
    Queue(#[from] QueueError),
}

/// Orchestrates the store, the propagation queue, and cache reads.
///
/// Mutations are committed to the store synchronously; only after the commit
/// is a [`CacheTask`] handed to the queue. The cache is never written from the
/// request path.
pub struct LinkService {
    repository: Arc<dyn LinkRepository>,
    cache: Arc<dyn CacheProvider>,
    queue: CacheTaskQueue,
}

impl LinkService {
    /// Creates a new link service.
    pub fn new(
        repository: Arc<dyn LinkRepository>,
        cache: Arc<dyn CacheProvider>,
        queue: CacheTaskQueue,
    ) -> Self {
        Self {
            repository,
            cache,
            queue,
        }
    }

    /// Returns the authoritative record for `path`.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::NotFound`] or [`LinkError::Internal`].
    pub async fn get_link(&self, path: &str) -> Result<LinkRecord, ServiceError> {
        Ok(self.repository.get_link_details(path).await?)
    }

    /// Creates a link and queues its cache projection.
    ///
    /// # Errors
    ///
    /// Store sentinels are returned before anything is queued.
    /// [`QueueError::TaskSubmitFailed`] means the record exists but the cache
    /// was not told about it.
    pub async fn create_link(&self, record: LinkRecord) -> Result<(), ServiceError> {
        let task = projection_task(&record);
        self.repository.create_link(record).await?;
        self.queue.submit_task(task).await?;
        Ok(())
    }

    /// Updates a link and queues its new cache projection.
    ///
    /// [`LinkError::NoChange`] is returned as an error and queues nothing.
    ///
    /// # Errors
    ///
    /// See [`Self::create_link`].
    pub async fn update_link(&self, record: LinkRecord) -> Result<(), ServiceError> {
        let task = projection_task(&record);
        self.repository.update_link(record).await?;
        self.queue.submit_task(task).await?;
        Ok(())
    }

    /// Deletes a link and queues removal of its cache entry.
    ///
    /// # Errors
    ///
    /// See [`Self::create_link`].
    pub async fn delete_link(&self, path: &str) -> Result<(), ServiceError> {
        self.repository.delete_link(path).await?;
        self.queue.submit_task(CacheTask::remove(path)).await?;
        Ok(())
    }

    /// Resolves `path` to its redirect target, cache first.
    ///
    /// A cache miss or cache failure falls back to the store. Disabled links
    /// resolve to [`LinkError::NotFound`]. Misses are not written back: a
    /// back-fill issued from a read could land after a later removal and
    /// resurrect a deleted link.
    ///
    /// # Errors
    ///
    /// Returns [`LinkError::NotFound`] or [`LinkError::Internal`].
    pub async fn resolve(&self, path: &str) -> Result<String, ServiceError> {
        match self.cache.fetch_link(path).await {
            Ok(target) => return Ok(target),
            Err(CacheError::NotFound) => debug!(path, "Resolving from store after cache miss"),
            Err(e) => warn!(path, error = %e, "Cache lookup failed, resolving from store"),
        }

        let record = self.repository.get_link_details(path).await?;
        if !record.enabled {
            return Err(LinkError::NotFound.into());
        }

        Ok(record.target_url)
    }

    /// Returns the propagation queue, for health reporting.
    pub fn queue(&self) -> &CacheTaskQueue {
        &self.queue
    }

    /// Returns the cache provider, for health reporting.
    pub fn cache(&self) -> &Arc<dyn CacheProvider> {
        &self.cache
    }

    /// Checks whether the store is reachable.
    pub async fn store_healthy(&self) -> bool {
        self.repository.health_check().await
    }
}

/// Cache projection of a record: enabled links map to their target, disabled
/// links must not resolve from the cache.
fn projection_task(record: &LinkRecord) -> CacheTask {
    if record.enabled {
        CacheTask::set(&record.path, &record.target_url)
    } else {
        CacheTask::remove(&record.path)
    }
}
