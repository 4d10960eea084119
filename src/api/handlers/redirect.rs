//! Handler for short path redirect.

use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect},
};

use crate::error::AppError;
use crate::state::AppState;

/// Redirects a registered path to its target URL.
///
/// # Endpoint
///
/// `GET /{path}`
///
/// # Lookup
///
/// The cache is consulted first; a miss or cache failure falls back to the
/// store. Cache reads may trail the store by whatever is still queued for
/// propagation.
///
/// # Errors
///
/// Returns 404 Not Found if the path is unknown or the link is disabled.
pub async fn redirect_handler(
    Path(path): Path<String>,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, AppError> {
    let target = state.link_service.resolve(&path).await?;
    Ok(Redirect::temporary(&target))
}
