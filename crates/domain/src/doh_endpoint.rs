use std::fmt;
use std::net::{IpAddr, SocketAddr};

/// Where DoH queries go, fixed once bootstrap resolution has completed.
///
/// `host` is the provider's service name (sent as the HTTP authority and used
/// for certificate validation); `address` is the bootstrapped IP it is pinned to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DohEndpoint {
    scheme: &'static str,
    host: String,
    address: IpAddr,
    port: u16,
}

impl DohEndpoint {
    pub fn https(host: impl Into<String>, address: IpAddr) -> Self {
        Self {
            scheme: "https",
            host: host.into(),
            address,
            port: 443,
        }
    }

    /// Plain HTTP endpoint, for local backends and tests.
    pub fn http(host: impl Into<String>, address: SocketAddr) -> Self {
        Self {
            scheme: "http",
            host: host.into(),
            address: address.ip(),
            port: address.port(),
        }
    }

    pub fn with_port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    pub fn scheme(&self) -> &'static str {
        self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn address(&self) -> IpAddr {
        self.address
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.address, self.port)
    }

    fn is_default_port(&self) -> bool {
        matches!((self.scheme, self.port), ("https", 443) | ("http", 80))
    }

    /// Base URL addressed by service name, e.g. `https://dns.google.com`.
    pub fn base_url(&self) -> String {
        if self.is_default_port() {
            format!("{}://{}", self.scheme, self.host)
        } else {
            format!("{}://{}:{}", self.scheme, self.host, self.port)
        }
    }
}

impl fmt::Display for DohEndpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.base_url(), self.address)
    }
}
