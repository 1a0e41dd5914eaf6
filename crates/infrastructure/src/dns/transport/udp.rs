//! UDP transport to the upstream recursive resolver (RFC 1035 §4.2.1).
//!
//! One datagram out, one datagram back. No retries and no TCP fallback on
//! truncation.

use async_trait::async_trait;
use ferrous_dns64_application::ports::UpstreamResolver;
use ferrous_dns64_application::wire;
use ferrous_dns64_domain::{DnsQuestion, DomainError};
use hickory_proto::op::Message;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::debug;

/// Maximum UDP DNS response size with EDNS(0)
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(2000);

pub struct UdpUpstreamResolver {
    server_addr: SocketAddr,
    timeout: Duration,
}

impl UdpUpstreamResolver {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self::with_timeout(server_addr, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(server_addr: SocketAddr, timeout: Duration) -> Self {
        Self {
            server_addr,
            timeout,
        }
    }

    fn transport_error(&self, reason: impl std::fmt::Display) -> DomainError {
        DomainError::TransportError {
            server: self.server_addr.to_string(),
            reason: reason.to_string(),
        }
    }

    async fn send_and_receive(&self, request: &[u8]) -> Result<Vec<u8>, DomainError> {
        // Bind to ephemeral port (0 = OS assigns)
        let bind_addr = if self.server_addr.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        };

        let socket = UdpSocket::bind(bind_addr)
            .await
            .map_err(|e| self.transport_error(format!("Failed to bind UDP socket: {}", e)))?;

        // A connected socket only accepts datagrams from the upstream address.
        socket
            .connect(self.server_addr)
            .await
            .map_err(|e| self.transport_error(format!("Failed to connect: {}", e)))?;

        let bytes_sent = socket
            .send(request)
            .await
            .map_err(|e| self.transport_error(format!("Failed to send query: {}", e)))?;

        debug!(server = %self.server_addr, bytes_sent, "UDP query sent");

        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];
        let bytes_received = socket
            .recv(&mut recv_buf)
            .await
            .map_err(|e| self.transport_error(format!("Failed to receive response: {}", e)))?;

        recv_buf.truncate(bytes_received);

        debug!(server = %self.server_addr, bytes_received, "UDP response received");

        Ok(recv_buf)
    }
}

#[async_trait]
impl UpstreamResolver for UdpUpstreamResolver {
    async fn exchange(
        &self,
        question: &DnsQuestion,
        recursion_desired: bool,
    ) -> Result<Message, DomainError> {
        let id = fastrand::u16(..);
        let request = wire::encode(&wire::query_message(question, id, recursion_desired)?)?;

        let response_bytes = tokio::time::timeout(self.timeout, self.send_and_receive(&request))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                server: self.server_addr.to_string(),
            })??;

        let response = wire::decode(&response_bytes)
            .map_err(|e| self.transport_error(format!("Undecodable response: {}", e)))?;

        if response.id() != id {
            return Err(DomainError::ResponseIdMismatch {
                server: self.server_addr.to_string(),
                expected: id,
                received: response.id(),
            });
        }

        Ok(response)
    }

    fn server_name(&self) -> String {
        self.server_addr.to_string()
    }
}
