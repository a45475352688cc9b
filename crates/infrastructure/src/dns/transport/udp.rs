//! UDP Transport for DNS queries (RFC 1035 §4.2.1)
//!
//! Messages are sent as-is (no framing). A single socket bound to an
//! ephemeral port carries every query of a resolution. Truncated (TC)
//! responses are handed back unchanged; there is no TCP retry.

use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use rootwalk_domain::DomainError;
use std::net::{Ipv4Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tracing::debug;

/// Largest datagram accepted from a server.
const MAX_UDP_RESPONSE_SIZE: usize = 4096;

/// DNS over UDP transport
pub struct UdpTransport {
    socket: UdpSocket,
}

impl UdpTransport {
    /// Binds to an ephemeral IPv4 port (0 = OS assigns).
    pub async fn bind() -> Result<Self, DomainError> {
        Self::bind_to(SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))).await
    }

    pub async fn bind_to(addr: SocketAddr) -> Result<Self, DomainError> {
        let socket = UdpSocket::bind(addr).await.map_err(|e| {
            DomainError::TransportIo(format!("Failed to bind UDP socket on {}: {}", addr, e))
        })?;
        Ok(Self { socket })
    }

    pub fn local_addr(&self) -> Result<SocketAddr, DomainError> {
        self.socket
            .local_addr()
            .map_err(|e| DomainError::TransportIo(format!("No local address: {}", e)))
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(&self, message_bytes: &[u8], server: SocketAddr) -> Result<(), DomainError> {
        let bytes_sent = self
            .socket
            .send_to(message_bytes, server)
            .await
            .map_err(|e| {
                DomainError::TransportIo(format!("Failed to send UDP query to {}: {}", server, e))
            })?;

        debug!(server = %server, bytes_sent = bytes_sent, "UDP query sent");
        Ok(())
    }

    async fn receive(&self, timeout: Duration) -> Result<TransportResponse, DomainError> {
        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        let (bytes_received, from) = tokio::time::timeout(timeout, self.socket.recv_from(&mut recv_buf))
            .await
            .map_err(|_| DomainError::TransportTimeout {
                waited_ms: timeout.as_millis() as u64,
            })?
            .map_err(|e| DomainError::TransportIo(format!("Failed to receive UDP response: {}", e)))?;

        recv_buf.truncate(bytes_received);

        debug!(
            from = %from,
            bytes_received = bytes_received,
            "UDP response received"
        );

        Ok(TransportResponse {
            bytes: recv_buf,
            from,
        })
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }
}
