//! doh-bridge domain layer
pub mod config;
pub mod dns_record;
pub mod dns_request;
pub mod doh_endpoint;
pub mod errors;

pub use config::{CliOverrides, Config, ConfigError, DohConfig};
pub use dns_record::{DnsRecord, RecordData, RecordType};
pub use dns_request::{DnsRequest, Question};
pub use doh_endpoint::DohEndpoint;
pub use errors::DomainError;
