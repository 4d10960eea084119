#![allow(dead_code)]

use atlas_links::application::services::LinkService;
use atlas_links::domain::cache_worker::cache_task_queue;
use atlas_links::domain::repositories::LinkRepository;
use atlas_links::infrastructure::cache::{CacheError, CacheProvider, LocalCache};
use atlas_links::infrastructure::persistence::MemoryLinkRepository;
use atlas_links::state::AppState;
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;

pub struct TestContext {
    pub state: AppState,
    pub store: Arc<MemoryLinkRepository>,
    pub cache: Arc<LocalCache>,
    pub worker: JoinHandle<()>,
}

/// Builds application state over the in-memory store and a local cache, with
/// the cache worker running in the background.
pub fn create_test_state() -> TestContext {
    create_test_state_with_capacity(100)
}

pub fn create_test_state_with_capacity(capacity: usize) -> TestContext {
    let store = Arc::new(MemoryLinkRepository::new());
    let cache = Arc::new(LocalCache::new(Duration::from_secs(60), 1_000));

    let (queue, worker) = cache_task_queue(capacity, cache.clone());
    let worker = tokio::spawn(worker.run());

    let repository: Arc<dyn LinkRepository> = store.clone();
    let provider: Arc<dyn CacheProvider> = cache.clone();
    let state = AppState::new(LinkService::new(repository, provider, queue));

    TestContext {
        state,
        store,
        cache,
        worker,
    }
}

/// Polls the cache until `path` resolves to `expected` (`None` meaning
/// absent), panicking after two seconds.
pub async fn wait_for_cache(cache: &LocalCache, path: &str, expected: Option<&str>) {
    for _ in 0..200 {
        let current = match cache.fetch_link(path).await {
            Ok(target) => Some(target),
            Err(CacheError::NotFound) => None,
            Err(e) => panic!("unexpected cache error: {e}"),
        };

        if current.as_deref() == expected {
            return;
        }

        tokio::time::sleep(Duration::from_millis(10)).await;
    }

    panic!("cache entry for {path:?} never became {expected:?}");
}
