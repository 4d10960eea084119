//! DTOs for link management endpoints.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;
use validator::Validate;

use crate::domain::entities::LinkRecord;

/// Letters, digits and inner hyphens; no leading or trailing hyphen.
static PATH_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9]([A-Za-z0-9-]*[A-Za-z0-9])?$").unwrap());

/// Request body for `POST /api/v1/link` and `PUT /api/v1/link`.
///
/// The path identifies the link in both cases; an update replaces all three
/// mutable fields.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct LinkRequest {
    #[validate(length(min = 1, max = 50, message = "must be 1-50 characters"))]
    #[validate(regex(path = "*PATH_REGEX", message = "is not a valid link path"))]
    pub path: String,

    #[validate(length(min = 3, max = 50, message = "must be 3-50 characters"))]
    pub canonical_name: String,

    #[serde(rename = "targetURL")]
    #[validate(length(min = 3, max = 500, message = "must be 3-500 characters"))]
    #[validate(url(message = "is not a valid URL"))]
    pub target_url: String,

    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

fn default_enabled() -> bool {
    true
}

impl LinkRequest {
    /// Converts the request into a record attributed to `actor`.
    pub fn into_record(self, actor: &str) -> LinkRecord {
        LinkRecord::new(
            self.path,
            self.canonical_name,
            self.target_url,
            self.enabled,
            actor,
        )
    }
}

/// JSON representation of a stored link.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub path: String,
    pub canonical_name: String,
    #[serde(rename = "targetURL")]
    pub target_url: String,
    pub enabled: bool,
    pub created_time: i64,
    pub last_modified: i64,
    pub last_modified_by: String,
}

impl From<LinkRecord> for LinkResponse {
    fn from(record: LinkRecord) -> Self {
        Self {
            path: record.path,
            canonical_name: record.canonical_name,
            target_url: record.target_url,
            enabled: record.enabled,
            created_time: record.created_time,
            last_modified: record.last_modified,
            last_modified_by: record.last_modified_by,
        }
    }
}

/// Outcome of a create or update.
#[derive(Debug, Serialize)]
pub struct MutationResponse {
    /// `created`, `updated` or `unchanged`.
    pub status: &'static str,
    pub path: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(path: &str, name: &str, target: &str) -> LinkRequest {
        LinkRequest {
            path: path.to_string(),
            canonical_name: name.to_string(),
            target_url: target.to_string(),
            enabled: true,
        }
    }

    #[test]
    fn test_valid_request() {
        assert!(request("go", "Go Link", "https://example.com").validate().is_ok());
        assert!(request("a-b-9", "Abc", "http://example.com/x").validate().is_ok());
    }

    #[test]
    fn test_invalid_paths() {
        for path in ["", "-go", "go-", "go/there", "a b"] {
            assert!(
                request(path, "Go Link", "https://example.com").validate().is_err(),
                "path {path:?} should be rejected"
            );
        }
    }

    #[test]
    fn test_invalid_name_and_target() {
        assert!(request("go", "Go", "https://example.com").validate().is_err());
        assert!(request("go", "Go Link", "not a url").validate().is_err());
    }

    #[test]
    fn test_deserializes_camel_case_field_names() {
        let req: LinkRequest = serde_json::from_value(json!({
            "path": "go",
            "canonicalName": "Go Link",
            "targetURL": "https://example.com"
        }))
        .unwrap();

        assert_eq!(req.target_url, "https://example.com");
        assert!(req.enabled);

        let record = req.into_record("alice");
        assert_eq!(record.last_modified_by, "alice");
    }

    #[test]
    fn test_response_field_names() {
        let record = LinkRecord::new("go", "Go Link", "https://example.com", false, "alice");
        let value = serde_json::to_value(LinkResponse::from(record)).unwrap();

        assert_eq!(value["targetURL"], "https://example.com");
        assert_eq!(value["canonicalName"], "Go Link");
        assert_eq!(value["lastModifiedBy"], "alice");
        assert_eq!(value["enabled"], false);
    }
}
