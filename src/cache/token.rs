/// Bearer token with the refresh-adjusted expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CachedToken {
    pub value: String,
    pub expires_at_epoch_millis: i64, // UNIX TIMESTAMP, millis
}

impl CachedToken {
    pub fn new(value: String, expires_at_epoch_millis: i64) -> Self {
        Self { value, expires_at_epoch_millis }
    }

    pub fn is_valid_at(&self, now_millis: i64) -> bool {
        self.expires_at_epoch_millis > now_millis
    }
}
