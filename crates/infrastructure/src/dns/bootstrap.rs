//! One-shot plain-DNS resolution of the DoH provider's host name.
//!
//! Runs once at startup against a fixed authority. There is no retry: a
//! timeout or an answer without A records is fatal to the caller. Stray
//! datagrams are left to the transport, which keeps waiting for the reply
//! matching the query ID.

use super::forwarding::{MessageBuilder, ResponseParser};
use super::transport::{DnsTransport, UdpTransport};
use doh_bridge_domain::{DohConfig, DohEndpoint, DomainError, RecordType};
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

pub struct BootstrapResolver {
    transport: Arc<dyn DnsTransport>,
    timeout: Duration,
}

impl BootstrapResolver {
    pub fn new(authority: SocketAddr, timeout: Duration) -> Self {
        Self::with_transport(Arc::new(UdpTransport::new(authority)), timeout)
    }

    pub fn with_transport(transport: Arc<dyn DnsTransport>, timeout: Duration) -> Self {
        Self { transport, timeout }
    }

    pub fn authority(&self) -> SocketAddr {
        self.transport.server_addr()
    }

    /// Resolve `hostname` to a single IPv4 address.
    ///
    /// With several A records the last one in the answer section wins.
    pub async fn resolve(&self, hostname: &str) -> Result<Ipv4Addr, DomainError> {
        let authority = self.authority();
        let (id, query) = MessageBuilder::build_query_with_id(hostname, &RecordType::A)?;

        debug!(
            hostname = %hostname,
            authority = %authority,
            protocol = self.transport.protocol_name(),
            id,
            "Sending bootstrap query"
        );

        let reply = self
            .transport
            .send(&query, self.timeout)
            .await
            .map_err(|e| match e {
                DomainError::QueryTimeout => DomainError::BootstrapTimeout {
                    authority: authority.to_string(),
                },
                other => DomainError::BootstrapFailed(other.to_string()),
            })?;

        let response = ResponseParser::parse(&reply.bytes)
            .map_err(|e| DomainError::BootstrapFailed(e.to_string()))?;

        if response.addresses.len() > 1 {
            warn!(
                hostname = %hostname,
                count = response.addresses.len(),
                addresses = ?response.addresses,
                "Multiple A records for DoH host, using the last one"
            );
        }

        let address = response.addresses.last().copied().ok_or_else(|| {
            DomainError::BootstrapFailed(format!(
                "no A record for {} from {} (rcode {:?})",
                hostname, authority, response.rcode
            ))
        })?;

        info!(hostname = %hostname, address = %address, authority = %authority, "Bootstrap resolved");
        Ok(address)
    }

    /// Resolve the configured provider and pin it into a `DohEndpoint`.
    pub async fn resolve_endpoint(&self, config: &DohConfig) -> Result<DohEndpoint, DomainError> {
        let address = IpAddr::V4(self.resolve(&config.host).await?);

        let endpoint = if config.tls {
            DohEndpoint::https(config.host.clone(), address).with_port(config.port)
        } else {
            DohEndpoint::http(config.host.clone(), SocketAddr::new(address, config.port))
        };

        Ok(endpoint)
    }
}
