//! DNS over UDP (RFC 1035 §4.2.1). Messages are sent as-is, no framing.

use super::{DnsTransport, TransportResponse};
use async_trait::async_trait;
use doh_bridge_domain::DomainError;
use std::net::{Ipv4Addr, Ipv6Addr, SocketAddr};
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::time::Instant;
use tracing::{debug, warn};

const MAX_UDP_RESPONSE_SIZE: usize = 4096;

fn same_transaction(query: &[u8], reply: &[u8]) -> bool {
    query.len() >= 2 && reply.len() >= 2 && query[..2] == reply[..2]
}

pub struct UdpTransport {
    server_addr: SocketAddr,
}

impl UdpTransport {
    pub fn new(server_addr: SocketAddr) -> Self {
        Self { server_addr }
    }

    fn ephemeral_bind_addr(&self) -> SocketAddr {
        if self.server_addr.is_ipv4() {
            SocketAddr::from((Ipv4Addr::UNSPECIFIED, 0))
        } else {
            SocketAddr::from((Ipv6Addr::UNSPECIFIED, 0))
        }
    }
}

#[async_trait]
impl DnsTransport for UdpTransport {
    async fn send(
        &self,
        message_bytes: &[u8],
        timeout: Duration,
    ) -> Result<TransportResponse, DomainError> {
        let socket = UdpSocket::bind(self.ephemeral_bind_addr())
            .await
            .map_err(|e| DomainError::IoError(format!("Failed to bind UDP socket: {}", e)))?;

        let bytes_sent =
            tokio::time::timeout(timeout, socket.send_to(message_bytes, self.server_addr))
                .await
                .map_err(|_| DomainError::QueryTimeout)?
                .map_err(|e| {
                    DomainError::IoError(format!(
                        "Failed to send UDP query to {}: {}",
                        self.server_addr, e
                    ))
                })?;

        debug!(server = %self.server_addr, bytes_sent, "UDP query sent");

        let deadline = Instant::now() + timeout;
        let mut recv_buf = vec![0u8; MAX_UDP_RESPONSE_SIZE];

        loop {
            let (bytes_received, from_addr) =
                tokio::time::timeout_at(deadline, socket.recv_from(&mut recv_buf))
                    .await
                    .map_err(|_| DomainError::QueryTimeout)?
                    .map_err(|e| {
                        DomainError::IoError(format!(
                            "Failed to receive UDP response from {}: {}",
                            self.server_addr, e
                        ))
                    })?;

            if from_addr != self.server_addr {
                warn!(
                    expected = %self.server_addr,
                    received_from = %from_addr,
                    "Discarding UDP datagram from unexpected source"
                );
                continue;
            }

            let reply = &recv_buf[..bytes_received];
            if !same_transaction(message_bytes, reply) {
                warn!(
                    server = %self.server_addr,
                    bytes_received,
                    "Discarding UDP reply with mismatched transaction ID"
                );
                continue;
            }

            debug!(server = %self.server_addr, bytes_received, "UDP response received");

            return Ok(TransportResponse {
                bytes: reply.to_vec(),
            });
        }
    }

    fn protocol_name(&self) -> &'static str {
        "UDP"
    }

    fn server_addr(&self) -> SocketAddr {
        self.server_addr
    }
}
