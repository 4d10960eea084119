//! Core domain entities.
//!
//! The registry has a single entity, [`LinkRecord`]. The cache holds only a
//! derived `path → target_url` projection of it and has no entity of its own.

pub mod link;

pub use link::{LinkRecord, next_modified_time};
