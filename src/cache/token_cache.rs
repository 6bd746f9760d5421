use tokio::sync::{Mutex, MutexGuard, RwLock};

use crate::cache::token::CachedToken;

/// Token cache owned by the service instance and shared by all requests.
///
/// The slot is only ever replaced as a whole. `refresh_guard` serializes
/// refreshes so racing callers trigger a single credential exchange.
#[derive(Debug, Default)]
pub struct TokenCache {
    current: RwLock<Option<CachedToken>>,
    refresh: Mutex<()>,
}

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get token if it exists and is not expired
    pub async fn get_valid(&self, now_millis: i64) -> Option<CachedToken> {
        self.current
            .read()
            .await
            .as_ref()
            .filter(|token| token.is_valid_at(now_millis))
            .cloned()
    }

    pub async fn set(&self, token: CachedToken) {
        *self.current.write().await = Some(token);
    }

    pub async fn refresh_guard(&self) -> MutexGuard<'_, ()> {
        self.refresh.lock().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn expired_token_is_not_returned() {
        let cache = TokenCache::new();
        cache.set(CachedToken::new("t".into(), 1_000)).await;

        assert_eq!(cache.get_valid(999).await.map(|t| t.value), Some("t".to_string()));
        assert!(cache.get_valid(1_000).await.is_none());
        assert!(cache.get_valid(5_000).await.is_none());
    }

    #[tokio::test]
    async fn set_replaces_whole_value() {
        let cache = TokenCache::new();
        cache.set(CachedToken::new("old".into(), i64::MAX)).await;
        cache.set(CachedToken::new("new".into(), 10)).await;

        assert!(cache.get_valid(10).await.is_none());
        assert_eq!(cache.get_valid(0).await, Some(CachedToken::new("new".into(), 10)));
    }
}
