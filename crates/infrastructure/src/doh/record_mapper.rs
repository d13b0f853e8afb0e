//! Translation from DoH JSON answers to domain records.
//!
//! Handled types: A (1), AAAA (28), CNAME (5), MX (15). Every other type code
//! maps to `RecordType::Unsupported` and keeps its raw `data` text.

use super::payload::DohAnswer;
use doh_bridge_domain::{DnsRecord, DomainError, RecordData, RecordType};
use std::net::{Ipv4Addr, Ipv6Addr};

pub struct RecordMapper;

impl RecordMapper {
    /// Canonical tag for a numeric RR type code (`TYPE<n>` when unsupported).
    pub fn type_tag(code: u16) -> String {
        RecordType::from_code(code).to_string()
    }

    pub fn map_answer(answer: &DohAnswer) -> Result<DnsRecord, DomainError> {
        let record_type = RecordType::from_code(answer.record_type);

        let data = match record_type {
            RecordType::A => RecordData::A {
                address: answer
                    .data
                    .parse::<Ipv4Addr>()
                    .map_err(|_| malformed(record_type, &answer.data))?,
                text: answer.data.clone(),
            },
            RecordType::AAAA => RecordData::AAAA {
                address: answer
                    .data
                    .parse::<Ipv6Addr>()
                    .map_err(|_| malformed(record_type, &answer.data))?,
                text: answer.data.clone(),
            },
            RecordType::CNAME => RecordData::CNAME {
                data: answer.data.clone(),
            },
            RecordType::MX => Self::parse_mx(&answer.data)?,
            RecordType::Unsupported(_) => RecordData::Unsupported {
                data: answer.data.clone(),
            },
        };

        Ok(DnsRecord::new(
            answer.name.clone(),
            record_type,
            answer.ttl,
            data,
        ))
    }

    /// Map a whole `Answer` array; the first malformed entry fails the lot.
    pub fn map_answers(answers: &[DohAnswer]) -> Result<Vec<DnsRecord>, DomainError> {
        answers.iter().map(Self::map_answer).collect()
    }

    /// `"<priority> <exchange>"`, e.g. `"5 hotmail.com"`.
    fn parse_mx(data: &str) -> Result<RecordData, DomainError> {
        let (priority, exchange) = data
            .trim()
            .split_once(' ')
            .ok_or_else(|| malformed(RecordType::MX, data))?;

        let priority = priority
            .parse::<u16>()
            .map_err(|_| malformed(RecordType::MX, data))?;

        let exchange = exchange.trim();
        if exchange.is_empty() {
            return Err(malformed(RecordType::MX, data));
        }

        Ok(RecordData::MX {
            priority,
            exchange: exchange.to_string(),
        })
    }
}

fn malformed(record_type: RecordType, data: &str) -> DomainError {
    DomainError::MalformedAnswer {
        record_type: record_type.to_string(),
        data: data.to_string(),
    }
}
