//! Domain layer containing business entities and logic.
//!
//! # Architecture
//!
//! - [`entities`] - The [`entities::LinkRecord`] entity and its comparator
//! - [`errors`] - Store and queue outcomes
//! - [`repositories`] - Store trait definitions
//! - [`cache_task`] - Cache propagation task model
//! - [`cache_worker`] - Bounded propagation queue and its worker
//!
//! # Propagation Flow
//!
//! 1. A handler commits a mutation through [`repositories::LinkRepository`]
//! 2. A [`cache_task::CacheTask`] is submitted to the bounded queue
//! 3. [`cache_worker::CacheWorker`] applies it to the cache provider
//! 4. Failures are logged and dropped; the store stays authoritative

pub mod cache_task;
pub mod cache_worker;
pub mod entities;
pub mod errors;
pub mod repositories;
