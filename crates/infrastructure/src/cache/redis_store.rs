use async_trait::async_trait;
use ferrous_dns64_application::ports::CacheStore;
use ferrous_dns64_domain::{CacheKey, DomainError};
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use std::time::Duration;
use tracing::{debug, info};

/// Cache store backed by Redis `GET` / `SET .. EX`.
///
/// The [`ConnectionManager`] reconnects on its own and is cheap to clone, so
/// every call works on a clone of the same multiplexed connection.
pub struct RedisCacheStore {
    conn: ConnectionManager,
}

impl RedisCacheStore {
    pub async fn connect(url: &str) -> Result<Self, DomainError> {
        let client = redis::Client::open(url).map_err(|e| {
            DomainError::CacheUnavailable(format!("Invalid Redis URL '{}': {}", url, e))
        })?;

        let conn = client.get_connection_manager().await.map_err(|e| {
            DomainError::CacheUnavailable(format!("Failed to connect to Redis at {}: {}", url, e))
        })?;

        info!(url = %url, "Connected to Redis cache");

        Ok(Self { conn })
    }
}

#[async_trait]
impl CacheStore for RedisCacheStore {
    async fn get(&self, key: &CacheKey) -> Result<Option<Vec<u8>>, DomainError> {
        let mut conn = self.conn.clone();

        let value: Option<Vec<u8>> = conn
            .get(key.as_str())
            .await
            .map_err(|e| DomainError::CacheUnavailable(format!("GET {}: {}", key, e)))?;

        debug!(key = %key, hit = value.is_some(), "Redis GET");
        Ok(value)
    }

    async fn set(&self, key: &CacheKey, value: Vec<u8>, ttl: Duration) -> Result<(), DomainError> {
        let mut conn = self.conn.clone();
        // EX 0 is rejected by Redis.
        let seconds = ttl.as_secs().max(1);

        conn.set_ex::<_, _, ()>(key.as_str(), value, seconds)
            .await
            .map_err(|e| DomainError::CacheWriteFailed {
                key: key.to_string(),
                reason: e.to_string(),
            })?;

        debug!(key = %key, ttl_secs = seconds, "Redis SET");
        Ok(())
    }

    fn backend_name(&self) -> &'static str {
        "redis"
    }
}
