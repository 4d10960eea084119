//! Top-level router configuration.
//!
//! # Route Structure
//!
//! - `GET  /{path}`      - Link redirect, cache first
//! - `GET  /health`      - Health check: store, cache queue, cache
//! - `/api/v1/link*`     - Link management API
//!
//! # Middleware
//!
//! - **Tracing** - Structured request/response logging
//! - **Server header** - `Server: atlas-api` on every response
//! - **Path normalization** - Trailing slash handling

use crate::api;
use crate::api::handlers::{health_handler, redirect_handler};
use crate::api::middleware::{server_header, tracing};
use crate::state::AppState;
use axum::Router;
use axum::routing::get;
use tower::Layer;
use tower_http::normalize_path::{NormalizePath, NormalizePathLayer};

/// Constructs the application router with all routes and middleware.
pub fn app_router(state: AppState) -> NormalizePath<Router> {
    let router = Router::new()
        .route("/{path}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api::routes::link_routes())
        .with_state(state)
        .layer(server_header::layer())
        .layer(tracing::layer());

    NormalizePathLayer::trim_trailing_slash().layer(router)
}
