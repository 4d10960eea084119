//! Redirect target validation.

use url::Url;

/// Returns true if `target` is an absolute HTTP or HTTPS URL with a host.
///
/// Rejects `javascript:`, `data:`, `file:` and similar schemes that must never
/// be served as a redirect.
pub fn is_valid_target(target: &str) -> bool {
    let Ok(parsed) = Url::parse(target) else {
        return false;
    };

    matches!(parsed.scheme(), "http" | "https") && parsed.host().is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_http_and_https() {
        assert!(is_valid_target("https://example.com"));
        assert!(is_valid_target("http://example.com/path?q=1"));
    }

    #[test]
    fn test_rejects_dangerous_schemes() {
        assert!(!is_valid_target("javascript:alert(1)"));
        assert!(!is_valid_target("data:text/html,hi"));
        assert!(!is_valid_target("file:///etc/passwd"));
    }

    #[test]
    fn test_rejects_malformed() {
        assert!(!is_valid_target(""));
        assert!(!is_valid_target("not-a-url"));
    }
}
