use async_trait::async_trait;
use doh_bridge_domain::{DnsRecord, DomainError, Question};

/// Answers a single question against the DoH backend.
///
/// Every failure mode (transport, HTTP status, DoH status, payload, record
/// mapping) comes back as a typed `DomainError`; deciding what the DNS client
/// sees is left to the caller.
#[async_trait]
pub trait DohResolver: Send + Sync {
    async fn resolve(&self, question: &Question) -> Result<Vec<DnsRecord>, DomainError>;
}
