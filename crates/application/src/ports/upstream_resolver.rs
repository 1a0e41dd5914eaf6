use async_trait::async_trait;
use ferrous_dns64_domain::{DnsQuestion, DomainError};
use hickory_proto::op::Message;

/// The single recursive resolver cache misses are forwarded to.
#[async_trait]
pub trait UpstreamResolver: Send + Sync {
    /// Send one query and wait for one reply. No retries.
    async fn exchange(
        &self,
        question: &DnsQuestion,
        recursion_desired: bool,
    ) -> Result<Message, DomainError>;

    fn server_name(&self) -> String;
}
