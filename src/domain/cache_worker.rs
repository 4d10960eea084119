//! Bounded propagation queue and its single consumer.
//!
//! Request handlers commit to the store first and then hand a [`CacheTask`] to
//! [`CacheTaskQueue::submit_task`]. One [`CacheWorker`] drains the queue in
//! submission order, so two mutations of the same path reach the cache in the
//! order they were committed. Adding consumers would break that guarantee
//! without per-path partitioning.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc::{self, error::TrySendError};
use tokio_retry::RetryIf;
use tokio_retry::strategy::FixedInterval;
use tracing::{debug, error, info, warn};

use crate::domain::cache_task::CacheTask;
use crate::domain::errors::QueueError;
use crate::infrastructure::cache::CacheProvider;

/// Enqueue attempts made before a submission is rejected.
pub const SUBMIT_ATTEMPTS: usize = 3;

/// Pause between enqueue attempts while the buffer is full.
pub const SUBMIT_RETRY_DELAY: Duration = Duration::from_secs(1);

/// Creates a queue holding at most `capacity` pending tasks and the worker
/// that applies them to `cache`.
///
/// The worker must be spawned exactly once, e.g. `tokio::spawn(worker.run())`.
pub fn cache_task_queue(
    capacity: usize,
    cache: Arc<dyn CacheProvider>,
) -> (CacheTaskQueue, CacheWorker) {
    let (sender, receiver) = mpsc::channel(capacity);
    (CacheTaskQueue { sender }, CacheWorker { receiver, cache })
}

/// Producer handle for the propagation queue. Cheap to clone.
#[derive(Clone)]
pub struct CacheTaskQueue {
    sender: mpsc::Sender<CacheTask>,
}

impl CacheTaskQueue {
    /// Enqueues a task without waiting for buffer space.
    ///
    /// While the buffer is full the enqueue is retried up to
    /// [`SUBMIT_ATTEMPTS`] times, [`SUBMIT_RETRY_DELAY`] apart. The caller
    /// only learns that the task was queued, never that it was applied.
    ///
    /// # Errors
    ///
    /// Returns [`QueueError::TaskSubmitFailed`] when the buffer stays full for
    /// every attempt or the worker is gone. The cache will diverge from the
    /// store for this path until a later task overwrites it.
    pub async fn submit_task(&self, task: CacheTask) -> Result<(), QueueError> {
        let strategy = FixedInterval::new(SUBMIT_RETRY_DELAY).take(SUBMIT_ATTEMPTS - 1);

        let result = RetryIf::start(
            strategy,
            || {
                let task = task.clone();
                async move { self.sender.try_send(task) }
            },
            |e: &TrySendError<CacheTask>| matches!(e, TrySendError::Full(_)),
        )
        .await;

        match result {
            Ok(()) => {
                metrics::counter!("cache_tasks_submitted_total", "operation" => task.operation())
                    .increment(1);
                debug!(path = task.path(), operation = task.operation(), "Cache task queued");
                Ok(())
            }
            Err(e) => {
                metrics::counter!("cache_tasks_rejected_total", "operation" => task.operation())
                    .increment(1);
                warn!(
                    path = task.path(),
                    operation = task.operation(),
                    error = %e,
                    "Cache task could not be queued"
                );
                Err(QueueError::TaskSubmitFailed)
            }
        }
    }

    /// Returns true once the worker has stopped receiving.
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    /// Free slots currently available in the buffer.
    pub fn available_capacity(&self) -> usize {
        self.sender.capacity()
    }

    /// Total size of the buffer.
    pub fn max_capacity(&self) -> usize {
        self.sender.max_capacity()
    }
}

/// The single consumer of the propagation queue.
///
/// Owns the receiving end of the channel; there is no way to obtain a second
/// consumer for the same queue.
pub struct CacheWorker {
    receiver: mpsc::Receiver<CacheTask>,
    cache: Arc<dyn CacheProvider>,
}

impl CacheWorker {
    /// Applies tasks in submission order until every [`CacheTaskQueue`] handle
    /// has been dropped and the buffer is empty.
    ///
    /// A task that fails is logged and discarded; it is never retried.
    pub async fn run(mut self) {
        info!(backend = self.cache.backend_name(), "Cache worker started");

        while let Some(task) = self.receiver.recv().await {
            self.apply(task).await;
        }

        info!("Cache worker stopped, queue closed and drained");
    }

    async fn apply(&self, task: CacheTask) {
        let result = match &task {
            CacheTask::SetLink { path, target } => self.cache.upsert_link(path, target).await,
            CacheTask::RemoveLink { path } => self.cache.delete_link(path).await,
        };

        match result {
            Ok(()) => {
                metrics::counter!("cache_tasks_applied_total", "operation" => task.operation())
                    .increment(1);
                debug!(path = task.path(), operation = task.operation(), "Cache task applied");
            }
            Err(e) => {
                metrics::counter!("cache_tasks_failed_total", "operation" => task.operation())
                    .increment(1);
                error!(
                    segment = "cache_worker",
                    path = task.path(),
                    operation = task.operation(),
                    error = %e,
                    "Cache task failed"
                );
            }
        }
    }
}
