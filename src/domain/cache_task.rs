//! Cache propagation task model.

/// A committed store mutation waiting to be applied to the cache.
///
/// Created by [`crate::application::services::LinkService`] after the store
/// write succeeds, sent through the bounded queue, and applied by
/// [`crate::domain::cache_worker::CacheWorker`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheTask {
    /// Insert or replace `path → target`.
    SetLink { path: String, target: String },
    /// Drop any cached mapping for `path`.
    RemoveLink { path: String },
}

impl CacheTask {
    pub fn set(path: impl Into<String>, target: impl Into<String>) -> Self {
        Self::SetLink {
            path: path.into(),
            target: target.into(),
        }
    }

    pub fn remove(path: impl Into<String>) -> Self {
        Self::RemoveLink { path: path.into() }
    }

    /// Path the task applies to.
    pub fn path(&self) -> &str {
        match self {
            Self::SetLink { path, .. } | Self::RemoveLink { path } => path,
        }
    }

    /// Operation label used in logs and metrics.
    pub fn operation(&self) -> &'static str {
        match self {
            Self::SetLink { .. } => "set",
            Self::RemoveLink { .. } => "remove",
        }
    }
}
