mod cache_store;
mod upstream_resolver;

pub use cache_store::CacheStore;
pub use upstream_resolver::UpstreamResolver;
