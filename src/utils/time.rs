//! Wall-clock helpers for chat timestamps and key expiry checks.

use std::time::{SystemTime, UNIX_EPOCH};

/// Milliseconds since the Unix epoch, or 0 if the clock is before it.
pub fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

/// Whether an expiry timestamp in epoch milliseconds has passed.
pub fn is_expired(expires_at_millis: i64) -> bool {
    now_millis() >= expires_at_millis
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expiry() {
        assert!(is_expired(0));
        assert!(!is_expired(now_millis() + 60_000));
    }
}
