//! JSON shape returned by the DoH resolve endpoint.
//!
//! ```text
//! {"Status": 0, "Answer": [{"name": "example.com.", "type": 1, "TTL": 300, "data": "93.184.216.34"}]}
//! ```
//!
//! Fields this bridge does not use (`TC`, `RD`, `Question`, `Comment`, ...) are ignored.

use doh_bridge_domain::DomainError;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct DohPayload {
    #[serde(rename = "Status")]
    pub status: u32,

    /// Absent for NODATA/NXDOMAIN and SOA-only replies.
    #[serde(rename = "Answer", default)]
    pub answer: Vec<DohAnswer>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DohAnswer {
    pub name: String,

    #[serde(rename = "type")]
    pub record_type: u16,

    #[serde(rename = "TTL")]
    pub ttl: u32,

    pub data: String,
}

impl DohPayload {
    pub fn from_slice(body: &[u8]) -> Result<Self, DomainError> {
        serde_json::from_slice(body).map_err(|e| DomainError::InvalidDohPayload(e.to_string()))
    }

    pub fn is_success(&self) -> bool {
        self.status == 0
    }
}
