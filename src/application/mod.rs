//! Application layer services implementing business logic.
//!
//! Services consume the store and cache traits and the propagation queue, and
//! provide a clean API for HTTP handlers.
//!
//! # Available Services
//!
//! - [`services::link_service::LinkService`] - Link CRUD with cache propagation and redirect resolution

pub mod services;
