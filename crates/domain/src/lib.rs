//! Ferrous DNS64 Domain Layer
pub mod cache_key;
pub mod config;
pub mod dns_question;
pub mod errors;
pub mod nat64;
pub mod record_type;

pub use cache_key::CacheKey;
pub use config::{CacheBackend, CliOverrides, Config, ConfigError};
pub use dns_question::DnsQuestion;
pub use errors::DomainError;
pub use nat64::Nat64Prefix;
pub use record_type::RecordType;
