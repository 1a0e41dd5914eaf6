use async_trait::async_trait;
use ferrous_dns64_domain::{CacheKey, DomainError};
use std::time::Duration;

/// Key-value store holding wire-encoded responses.
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// `Ok(None)` is a miss. `Err` means the store could not be reached; callers
    /// treat it exactly like a miss.
    async fn get(&self, key: &CacheKey) -> Result<Option<Vec<u8>>, DomainError>;

    /// Store `value` so that it disappears on its own after `ttl`.
    async fn set(&self, key: &CacheKey, value: Vec<u8>, ttl: Duration) -> Result<(), DomainError>;

    fn backend_name(&self) -> &'static str;
}
