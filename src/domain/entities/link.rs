//! Link entity representing a path → target URL mapping.

/// A registered link, owned by the store.
///
/// `path` is the identity of the record and never changes after creation.
/// `created_time` is stamped once by the store; `last_modified` and
/// `last_modified_by` move together on every effective mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkRecord {
    pub path: String,
    pub canonical_name: String,
    pub target_url: String,
    pub enabled: bool,
    pub created_time: i64,
    pub last_modified: i64,
    pub last_modified_by: String,
}

impl LinkRecord {
    /// Creates a record carrying only the caller-controlled fields.
    ///
    /// Timestamps are left at zero; the store stamps them when the record is
    /// written.
    pub fn new(
        path: impl Into<String>,
        canonical_name: impl Into<String>,
        target_url: impl Into<String>,
        enabled: bool,
        modified_by: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            canonical_name: canonical_name.into(),
            target_url: target_url.into(),
            enabled,
            created_time: 0,
            last_modified: 0,
            last_modified_by: modified_by.into(),
        }
    }

    /// Compares the mutable fields of two records.
    ///
    /// Only `canonical_name`, `target_url` and `enabled` take part; identity and
    /// audit fields are ignored. The store uses this to turn redundant updates
    /// into [`crate::domain::errors::LinkError::NoChange`].
    pub fn content_eq(&self, other: &LinkRecord) -> bool {
        self.canonical_name == other.canonical_name
            && self.target_url == other.target_url
            && self.enabled == other.enabled
    }
}

/// Returns the next `last_modified` value for an effective update.
///
/// Second-resolution clocks can repeat within a burst of writes, so the value
/// never falls back to or below the previous stamp.
pub fn next_modified_time(previous: i64, now: i64) -> i64 {
    now.max(previous.saturating_add(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> LinkRecord {
        LinkRecord {
            path: "go".to_string(),
            canonical_name: "Go".to_string(),
            target_url: "https://example.com".to_string(),
            enabled: true,
            created_time: 100,
            last_modified: 200,
            last_modified_by: "alice".to_string(),
        }
    }

    #[test]
    fn test_new_leaves_timestamps_unset() {
        let link = LinkRecord::new("go", "Go", "https://example.com", true, "alice");

        assert_eq!(link.path, "go");
        assert_eq!(link.created_time, 0);
        assert_eq!(link.last_modified, 0);
        assert_eq!(link.last_modified_by, "alice");
    }

    #[test]
    fn test_content_eq_ignores_audit_fields() {
        let a = record();
        let mut b = record();
        b.created_time = 1;
        b.last_modified = 2;
        b.last_modified_by = "bob".to_string();
        b.path = "elsewhere".to_string();

        assert!(a.content_eq(&b));
    }

    #[test]
    fn test_content_eq_detects_each_mutable_field() {
        let base = record();

        let mut renamed = record();
        renamed.canonical_name = "Other".to_string();
        assert!(!base.content_eq(&renamed));

        let mut retargeted = record();
        retargeted.target_url = "https://example.org".to_string();
        assert!(!base.content_eq(&retargeted));

        let mut disabled = record();
        disabled.enabled = false;
        assert!(!base.content_eq(&disabled));
    }

    #[test]
    fn test_next_modified_time() {
        assert_eq!(next_modified_time(100, 150), 150);
        assert_eq!(next_modified_time(150, 150), 151);
        assert_eq!(next_modified_time(200, 150), 201);
    }
}
