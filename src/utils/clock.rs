//! Wall-clock helpers.

use chrono::Utc;

/// Current time as Unix epoch seconds.
pub fn epoch_now() -> i64 {
    Utc::now().timestamp()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_now_is_recent() {
        // 2024-01-01T00:00:00Z
        assert!(epoch_now() > 1_704_067_200);
    }
}
