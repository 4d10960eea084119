//! Infrastructure layer for external integrations.
//!
//! This layer implements interfaces defined by the domain layer, providing
//! concrete implementations for data persistence and caching.
//!
//! # Modules
//!
//! - [`cache`] - Cache providers (embedded moka and shared Redis)
//! - [`persistence`] - Link store implementations (PostgreSQL and in-memory)

pub mod cache;
pub mod persistence;
