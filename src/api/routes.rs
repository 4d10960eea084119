//! API route configuration.

use crate::api::handlers::{
    create_link_handler, delete_link_handler, get_link_handler, update_link_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// Link management routes, nested under `/api`.
///
/// # Endpoints
///
/// - `GET    /v1/link/{path}` - Fetch a stored link
/// - `POST   /v1/link`        - Register a new link
/// - `PUT    /v1/link`        - Replace a link's mutable fields
/// - `DELETE /v1/link/{path}` - Remove a link
pub fn link_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/v1/link",
            post(create_link_handler).put(update_link_handler),
        )
        .route(
            "/v1/link/{path}",
            get(get_link_handler).delete(delete_link_handler),
        )
}
