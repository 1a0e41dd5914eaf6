mod memory_store;
mod redis_store;

pub use memory_store::MemoryCacheStore;
pub use redis_store::RedisCacheStore;
