use doh_bridge_domain::DomainError;
use hickory_proto::op::{Message, ResponseCode};
use hickory_proto::rr::RData;
use std::net::Ipv4Addr;
use tracing::debug;

/// The parts of a plain DNS reply the bootstrap step cares about.
#[derive(Debug, Clone)]
pub struct DnsResponse {
    pub id: u16,

    pub rcode: ResponseCode,

    /// A records in answer-section order.
    pub addresses: Vec<Ipv4Addr>,
}

pub struct ResponseParser;

impl ResponseParser {
    pub fn parse(response_bytes: &[u8]) -> Result<DnsResponse, DomainError> {
        let message = Message::from_vec(response_bytes).map_err(|e| {
            DomainError::InvalidDnsResponse(format!("Failed to parse DNS response: {}", e))
        })?;

        let addresses: Vec<Ipv4Addr> = message
            .answers()
            .iter()
            .filter_map(|record| match record.data() {
                RData::A(a) => Some(a.0),
                _ => None,
            })
            .collect();

        let response = DnsResponse {
            id: message.id(),
            rcode: message.response_code(),
            addresses,
        };

        debug!(
            id = response.id,
            rcode = ?response.rcode,
            addresses = response.addresses.len(),
            answers = message.answers().len(),
            truncated = message.truncated(),
            "DNS response parsed"
        );

        Ok(response)
    }
}
