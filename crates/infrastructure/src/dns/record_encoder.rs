//! Domain records → hickory wire records for the response answer section.

use doh_bridge_domain::{DnsRecord, DomainError, RecordData};
use hickory_proto::rr::rdata::{A, AAAA, CNAME, MX};
use hickory_proto::rr::{Name, RData, Record};
use std::str::FromStr;
use tracing::debug;

pub struct RecordEncoder;

impl RecordEncoder {
    /// `Ok(None)` for record types the server cannot put on the wire.
    pub fn encode(record: &DnsRecord) -> Result<Option<Record>, DomainError> {
        let rdata = match &record.data {
            RecordData::A { address, .. } => RData::A(A(*address)),
            RecordData::AAAA { address, .. } => RData::AAAA(AAAA(*address)),
            RecordData::CNAME { data } => RData::CNAME(CNAME(parse_name(data)?)),
            RecordData::MX { priority, exchange } => {
                RData::MX(MX::new(*priority, parse_name(exchange)?))
            }
            RecordData::Unsupported { .. } => return Ok(None),
        };

        Ok(Some(Record::from_rdata(
            parse_name(&record.name)?,
            record.ttl,
            rdata,
        )))
    }

    /// Encode everything encodable; unsupported or unencodable records are
    /// skipped, never failing the whole response.
    pub fn encode_all(records: &[DnsRecord]) -> Vec<Record> {
        records
            .iter()
            .filter_map(|record| match Self::encode(record) {
                Ok(Some(encoded)) => Some(encoded),
                Ok(None) => {
                    debug!(
                        name = %record.name,
                        record_type = %record.record_type,
                        "Skipping unsupported record type"
                    );
                    None
                }
                Err(e) => {
                    debug!(name = %record.name, error = %e, "Skipping unencodable record");
                    None
                }
            })
            .collect()
    }
}

fn parse_name(name: &str) -> Result<Name, DomainError> {
    Name::from_str(name)
        .map_err(|e| DomainError::InvalidDomainName(format!("Invalid name '{}': {}", name, e)))
}
