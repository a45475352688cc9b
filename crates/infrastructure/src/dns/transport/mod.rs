pub mod udp;

use async_trait::async_trait;
use rootwalk_domain::DomainError;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

pub use udp::UdpTransport;

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,

    pub from: SocketAddr,
}

/// Datagram exchange used by the resolver.
///
/// One transport serves a whole resolution chain: `send` addresses a single
/// server and `receive` waits at most `timeout` for the next datagram,
/// failing with [`DomainError::TransportTimeout`] when none arrives.
#[async_trait]
pub trait DnsTransport: Send + Sync {
    async fn send(&self, message_bytes: &[u8], server: SocketAddr) -> Result<(), DomainError>;

    async fn receive(&self, timeout: Duration) -> Result<TransportResponse, DomainError>;

    fn protocol_name(&self) -> &'static str;
}

#[async_trait]
impl<T: DnsTransport + ?Sized> DnsTransport for Arc<T> {
    async fn send(&self, message_bytes: &[u8], server: SocketAddr) -> Result<(), DomainError> {
        (**self).send(message_bytes, server).await
    }

    async fn receive(&self, timeout: Duration) -> Result<TransportResponse, DomainError> {
        (**self).receive(timeout).await
    }

    fn protocol_name(&self) -> &'static str {
        (**self).protocol_name()
    }
}
