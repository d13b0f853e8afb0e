pub mod udp;

use async_trait::async_trait;
use doh_bridge_domain::DomainError;
use std::time::Duration;

pub use udp::UdpTransport;

#[derive(Debug)]
pub struct TransportResponse {
    pub bytes: Vec<u8>,
}

#[async_trait]
pub trait DnsTransport: Send + Sync {
    /// Send one query and wait up to `timeout` for the reply carrying the
    /// same transaction ID.
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError>;

    fn protocol_name(&self) -> &'static str;

    fn server_addr(&self) -> std::net::SocketAddr;
}
