use super::RecordType;
use std::net::{Ipv4Addr, Ipv6Addr};

/// Type-specific payload of an answer record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordData {
    /// `text` is the address exactly as the backend wrote it.
    A { address: Ipv4Addr, text: String },
    AAAA { address: Ipv6Addr, text: String },
    CNAME { data: String },
    MX { priority: u16, exchange: String },
    /// Answer of a type the bridge does not re-encode; `data` is the raw DoH text.
    Unsupported { data: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DnsRecord {
    pub name: String,

    pub record_type: RecordType,

    pub ttl: u32,

    pub data: RecordData,
}

impl DnsRecord {
    pub fn new(name: impl Into<String>, record_type: RecordType, ttl: u32, data: RecordData) -> Self {
        Self {
            name: name.into(),
            record_type,
            ttl,
            data,
        }
    }

    pub fn a(name: impl Into<String>, ttl: u32, address: Ipv4Addr) -> Self {
        let text = address.to_string();
        Self::new(name, RecordType::A, ttl, RecordData::A { address, text })
    }

    pub fn aaaa(name: impl Into<String>, ttl: u32, address: Ipv6Addr) -> Self {
        let text = address.to_string();
        Self::new(name, RecordType::AAAA, ttl, RecordData::AAAA { address, text })
    }

    pub fn cname(name: impl Into<String>, ttl: u32, target: impl Into<String>) -> Self {
        Self::new(
            name,
            RecordType::CNAME,
            ttl,
            RecordData::CNAME {
                data: target.into(),
            },
        )
    }

    pub fn mx(name: impl Into<String>, ttl: u32, priority: u16, exchange: impl Into<String>) -> Self {
        Self::new(
            name,
            RecordType::MX,
            ttl,
            RecordData::MX {
                priority,
                exchange: exchange.into(),
            },
        )
    }

    /// Address payload for A/AAAA records, as received.
    pub fn address(&self) -> Option<&str> {
        match &self.data {
            RecordData::A { text, .. } | RecordData::AAAA { text, .. } => Some(text),
            _ => None,
        }
    }
}
