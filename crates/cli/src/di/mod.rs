use ferrous_dns64_application::ports::CacheStore;
use ferrous_dns64_application::use_cases::{
    ComposeReplyUseCase, ResolveQueryUseCase, SynthesizeAaaaUseCase,
};
use ferrous_dns64_domain::{CacheBackend, Config};
use ferrous_dns64_infrastructure::cache::{MemoryCacheStore, RedisCacheStore};
use ferrous_dns64_infrastructure::dns::{DnsServerHandler, UdpUpstreamResolver};
use std::sync::Arc;
use tracing::{debug, info};

pub struct DnsServices {
    pub handler: DnsServerHandler,
}

impl DnsServices {
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        info!("Initializing DNS64 services");

        let cache = Self::build_cache(config).await?;
        let upstream = Arc::new(UdpUpstreamResolver::with_timeout(
            config.upstream.socket_addr()?,
            config.upstream.timeout(),
        ));
        let prefix = config.dns64.nat64_prefix()?;

        info!(
            upstream = %config.upstream.server,
            timeout_ms = config.upstream.timeout_ms,
            cache_backend = cache.backend_name(),
            cache_ttl_secs = config.cache.ttl_secs,
            prefix = %prefix,
            "DNS64 pipeline configured"
        );

        let resolver = Arc::new(
            ResolveQueryUseCase::new(cache, upstream).with_cache_ttl(config.cache.ttl()),
        );
        let synthesizer = SynthesizeAaaaUseCase::new(Arc::clone(&resolver), prefix);
        let compose = Arc::new(ComposeReplyUseCase::new(resolver, synthesizer));

        Ok(Self {
            handler: DnsServerHandler::new(compose),
        })
    }

    async fn build_cache(config: &Config) -> anyhow::Result<Arc<dyn CacheStore>> {
        match config.cache.backend {
            CacheBackend::Redis => {
                let store = RedisCacheStore::connect(&config.cache.redis_url).await?;
                Ok(Arc::new(store))
            }
            CacheBackend::Memory => {
                let store = Arc::new(MemoryCacheStore::new());
                Self::start_purge_task(Arc::clone(&store), config.cache.ttl());
                Ok(store)
            }
        }
    }

    fn start_purge_task(store: Arc<MemoryCacheStore>, period: std::time::Duration) {
        tokio::spawn(async move {
            let mut interval = tokio::time::interval(period);
            interval.tick().await;
            loop {
                interval.tick().await;
                let removed = store.purge_expired();
                debug!(removed, remaining = store.len(), "Memory cache purge cycle");
            }
        });
    }
}
