//! HTTP middleware for request processing and observability.

pub mod server_header;
pub mod tracing;
