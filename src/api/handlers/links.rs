//! Handlers for link management endpoints (get, create, update, delete).

use axum::{
    Json,
    extract::{Path, State},
    http::{HeaderMap, StatusCode},
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::link::{LinkRequest, LinkResponse, MutationResponse};
use crate::application::services::ServiceError;
use crate::domain::errors::LinkError;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::target_url::is_valid_target;

/// Header naming the actor recorded in `lastModifiedBy`.
pub const ACTOR_HEADER: &str = "x-actor";

const ANONYMOUS_ACTOR: &str = "anonymous";

fn actor_from_headers(headers: &HeaderMap) -> String {
    headers
        .get(ACTOR_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .unwrap_or(ANONYMOUS_ACTOR)
        .to_string()
}

fn validate_request(payload: &LinkRequest) -> Result<(), AppError> {
    payload.validate()?;

    if !is_valid_target(&payload.target_url) {
        return Err(AppError::bad_request(
            "InvalidParameters",
            json!(["targetURL must be an http or https URL"]),
        ));
    }

    Ok(())
}

/// Returns the stored record for a link.
///
/// # Endpoint
///
/// `GET /api/v1/link/{path}`
///
/// # Errors
///
/// Returns 404 Not Found if the path is not registered.
pub async fn get_link_handler(
    Path(path): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<LinkResponse>, AppError> {
    let record = state.link_service.get_link(&path).await?;
    Ok(Json(record.into()))
}

/// Registers a new link.
///
/// # Endpoint
///
/// `POST /api/v1/link`
///
/// # Request Body
///
/// ```json
/// {
///   "path": "go",
///   "canonicalName": "Go Link",
///   "targetURL": "https://example.com",
///   "enabled": true
/// }
/// ```
///
/// # Errors
///
/// - 400 Bad Request if validation fails
/// - 409 Conflict if the path is already registered
/// - 503 Service Unavailable if the link was saved but could not be queued
///   for cache propagation
pub async fn create_link_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<LinkRequest>,
) -> Result<(StatusCode, Json<MutationResponse>), AppError> {
    validate_request(&payload)?;

    let record = payload.into_record(&actor_from_headers(&headers));
    let path = record.path.clone();

    state.link_service.create_link(record).await?;

    Ok((
        StatusCode::CREATED,
        Json(MutationResponse {
            status: "created",
            path,
        }),
    ))
}

/// Replaces the mutable fields of an existing link.
///
/// # Endpoint
///
/// `PUT /api/v1/link`
///
/// # Behavior
///
/// An update that matches the stored record is not written and reports
/// `"status": "unchanged"`; nothing is propagated to the cache in that case.
///
/// # Errors
///
/// - 400 Bad Request if validation fails
/// - 404 Not Found if the path is not registered
/// - 503 Service Unavailable if the update could not be queued for propagation
pub async fn update_link_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<LinkRequest>,
) -> Result<Json<MutationResponse>, AppError> {
    validate_request(&payload)?;

    let record = payload.into_record(&actor_from_headers(&headers));
    let path = record.path.clone();

    let status = match state.link_service.update_link(record).await {
        Ok(()) => "updated",
        Err(ServiceError::Store(LinkError::NoChange)) => "unchanged",
        Err(e) => return Err(e.into()),
    };

    Ok(Json(MutationResponse { status, path }))
}

/// Removes a link.
///
/// # Endpoint
///
/// `DELETE /api/v1/link/{path}`
///
/// # Errors
///
/// - 404 Not Found if the path is not registered
/// - 503 Service Unavailable if the removal could not be queued for propagation
pub async fn delete_link_handler(
    Path(path): Path<String>,
    State(state): State<AppState>,
) -> Result<StatusCode, AppError> {
    state.link_service.delete_link(&path).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_actor_from_headers() {
        let mut headers = HeaderMap::new();
        assert_eq!(actor_from_headers(&headers), "anonymous");

        headers.insert(ACTOR_HEADER, HeaderValue::from_static("  alice "));
        assert_eq!(actor_from_headers(&headers), "alice");

        headers.insert(ACTOR_HEADER, HeaderValue::from_static(""));
        assert_eq!(actor_from_headers(&headers), "anonymous");
    }
}
