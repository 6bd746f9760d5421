use chrono::Utc;
use tokio::time::Instant;

use crate::utils::constants::TOKEN_LEEWAY_SECONDS;

/// Cached expiry for a token the upstream declared valid for `lifetime_seconds`,
/// pulled forward by the refresh leeway.
pub fn token_expires_at_millis(now_millis: i64, lifetime_seconds: u64) -> i64 {
    let effective = lifetime_seconds as i64 - TOKEN_LEEWAY_SECONDS as i64;
    now_millis.saturating_add(effective.saturating_mul(1000))
}

pub fn now_millis() -> i64 {
    Utc::now().timestamp_millis()
}

pub fn get_instant() -> Instant {
    Instant::now()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn expiry_subtracts_leeway() {
        assert_eq!(token_expires_at_millis(1_000_000, 3600), 1_000_000 + 3_570_000);
    }

    #[test]
    fn short_lifetime_lands_in_the_past() {
        // 20s lifetime minus 30s leeway
        assert_eq!(token_expires_at_millis(1_000_000, 20), 990_000);
    }
}
