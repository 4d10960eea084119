//! Domain error types for the store and the propagation queue.

/// Outcomes of store operations other than plain success.
///
/// `NotFound`, `AlreadyExists`, `NoChange` and `MissingPath` are expected
/// results that callers map directly. `Internal` covers every operational
/// failure; the provider detail is logged where it happens and never carried
/// upward.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    #[error("link not found")]
    NotFound,

    #[error("link already exists")]
    AlreadyExists,

    #[error("link is unchanged")]
    NoChange,

    #[error("link path must not be empty")]
    MissingPath,

    #[error("internal store error")]
    Internal,
}

/// Failure to hand a propagation task to the cache worker.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum QueueError {
    #[error("cache task could not be queued")]
    TaskSubmitFailed,
}
