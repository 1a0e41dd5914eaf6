use async_trait::async_trait;
use dashmap::DashMap;
use ferrous_dns64_application::ports::CacheStore;
use ferrous_dns64_domain::{CacheKey, DomainError};
use std::time::Duration;
use tokio::time::Instant;
use tracing::debug;

struct Entry {
    bytes: Vec<u8>,
    expires_at: Instant,
}

/// In-process cache store with the same expiry semantics as Redis `SET .. EX`.
///
/// Expired entries are dropped lazily on read and in bulk by
/// [`MemoryCacheStore::purge_expired`].
#[derive(Default)]
pub struct MemoryCacheStore {
    entries: DashMap<String, Entry>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of entries removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| entry.expires_at > now);
        let removed = before.saturating_sub(self.entries.len());

        if removed > 0 {
            debug!(removed, remaining = self.entries.len(), "Purged expired cache entries");
        }
        removed
    }
}

#[async_trait]
impl CacheStore for MemoryCacheStore {
    async fn get(&self, key: &CacheKey) -> Result<Option<Vec<u8>>, DomainError> {
        let now = Instant::now();

        if let Some(entry) = self.entries.get(key.as_str()) {
            if entry.expires_at > now {
                return Ok(Some(entry.bytes.clone()));
            }
        } else {
            return Ok(None);
        }

        self.entries
            .remove_if(key.as_str(), |_, entry| entry.expires_at <= now);
        Ok(None)
    }

    async fn set(&self, key: &CacheKey, value: Vec<u8>, ttl: Duration) -> Result<(), DomainError> {
        self.entries.insert(
            key.as_str().to_string(),
            Entry {
                bytes: value,
                expires_at: Instant::now() + ttl,
            },
        );
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "memory"
    }
}
