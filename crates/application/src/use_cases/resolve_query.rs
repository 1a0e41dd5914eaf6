use crate::ports::{CacheStore, UpstreamResolver};
use crate::wire;
use ferrous_dns64_domain::{CacheKey, DnsQuestion};
use hickory_proto::op::{Message, ResponseCode};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Default lifetime of a cached response, regardless of record TTLs.
pub const DEFAULT_CACHE_TTL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResolutionSource {
    Cache,
    Upstream,
    /// Upstream could not be reached; the message is a locally built SERVFAIL.
    LocalFailure,
}

#[derive(Debug, Clone)]
pub struct Resolution {
    pub message: Message,
    pub source: ResolutionSource,
}

impl Resolution {
    pub fn cache_hit(&self) -> bool {
        self.source == ResolutionSource::Cache
    }
}

/// Cache lookup, then upstream forwarding, then background cache population.
pub struct ResolveQueryUseCase {
    cache: Arc<dyn CacheStore>,
    upstream: Arc<dyn UpstreamResolver>,
    cache_ttl: Duration,
}

impl ResolveQueryUseCase {
    pub fn new(cache: Arc<dyn CacheStore>, upstream: Arc<dyn UpstreamResolver>) -> Self {
        Self {
            cache,
            upstream,
            cache_ttl: DEFAULT_CACHE_TTL,
        }
    }

    pub fn with_cache_ttl(mut self, cache_ttl: Duration) -> Self {
        self.cache_ttl = cache_ttl;
        self
    }

    pub async fn execute(&self, question: &DnsQuestion, recursion_desired: bool) -> Resolution {
        debug!(
            domain = %question.name,
            record_type = %question.record_type,
            "Resolving question"
        );

        let key = CacheKey::for_question(question);

        if let Some(message) = self.lookup_cache(&key).await {
            debug!(domain = %question.name, key = %key, "Found in cache");
            return Resolution {
                message,
                source: ResolutionSource::Cache,
            };
        }

        let response = match self.upstream.exchange(question, recursion_desired).await {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    error = %e,
                    domain = %question.name,
                    record_type = %question.record_type,
                    upstream = %self.upstream.server_name(),
                    "Upstream exchange failed, answering SERVFAIL"
                );
                return Resolution {
                    message: wire::error_response(
                        question,
                        recursion_desired,
                        ResponseCode::ServFail,
                    ),
                    source: ResolutionSource::LocalFailure,
                };
            }
        };

        if response.response_code() == ResponseCode::NoError {
            self.spawn_cache_write(key, question, &response);
        } else {
            debug!(
                domain = %question.name,
                rcode = %response.response_code(),
                "Upstream returned non-success code, not caching"
            );
        }

        Resolution {
            message: response,
            source: ResolutionSource::Upstream,
        }
    }

    /// Misses, store errors and undecodable entries all come back as `None`.
    async fn lookup_cache(&self, key: &CacheKey) -> Option<Message> {
        let bytes = match self.cache.get(key).await {
            Ok(Some(bytes)) => bytes,
            Ok(None) => {
                debug!(key = %key, "Cache miss");
                return None;
            }
            Err(e) => {
                warn!(
                    error = %e,
                    key = %key,
                    backend = self.cache.backend_name(),
                    "Cache lookup failed, treating as miss"
                );
                return None;
            }
        };

        match wire::decode(&bytes) {
            Ok(message) => Some(message),
            Err(e) => {
                warn!(error = %e, key = %key, "Cached entry is corrupt, treating as miss");
                None
            }
        }
    }

    fn spawn_cache_write(&self, key: CacheKey, question: &DnsQuestion, response: &Message) {
        let cache = Arc::clone(&self.cache);
        let ttl = self.cache_ttl;
        let response = response.clone();
        let domain = Arc::clone(&question.name);

        tokio::spawn(async move {
            let bytes = match wire::encode(&response) {
                Ok(bytes) => bytes,
                Err(e) => {
                    warn!(error = %e, domain = %domain, "Unable to encode response for cache");
                    return;
                }
            };

            match cache.set(&key, bytes, ttl).await {
                Ok(()) => debug!(key = %key, domain = %domain, "Added to cache"),
                Err(e) => warn!(error = %e, key = %key, domain = %domain, "Failed to write cache"),
            }
        });
    }
}
