use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Invalid DNS message: {0}")]
    InvalidDnsMessage(String),

    #[error("Invalid NAT64 prefix: {0}")]
    InvalidNat64Prefix(String),

    #[error("Cache store unavailable: {0}")]
    CacheUnavailable(String),

    #[error("Cache write failed for {key}: {reason}")]
    CacheWriteFailed { key: String, reason: String },

    #[error("Transport timeout waiting for {server}")]
    TransportTimeout { server: String },

    #[error("Transport error talking to {server}: {reason}")]
    TransportError { server: String, reason: String },

    #[error("Response id mismatch from {server}: expected {expected:#06x}, got {received:#06x}")]
    ResponseIdMismatch {
        server: String,
        expected: u16,
        received: u16,
    },
}
