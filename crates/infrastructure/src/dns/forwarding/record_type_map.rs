//! Mapping between `doh_bridge_domain::RecordType` and `hickory_proto::rr::RecordType`.
//!
//! Both sides are keyed by the IANA type code, so unknown types survive the
//! round trip as `Unsupported(code)` / `Unknown(code)`.

use doh_bridge_domain::RecordType;
use hickory_proto::rr::RecordType as HickoryRecordType;

pub struct RecordTypeMapper;

impl RecordTypeMapper {
    /// Domain type → hickory type (building queries and answers).
    pub fn to_hickory(record_type: &RecordType) -> HickoryRecordType {
        match record_type {
            RecordType::A => HickoryRecordType::A,
            RecordType::AAAA => HickoryRecordType::AAAA,
            RecordType::CNAME => HickoryRecordType::CNAME,
            RecordType::MX => HickoryRecordType::MX,
            RecordType::Unsupported(code) => HickoryRecordType::from(*code),
        }
    }

    /// Hickory type → domain type (incoming questions). Never fails: types we
    /// cannot encode an answer for are still forwarded to the backend.
    pub fn from_hickory(hickory_type: HickoryRecordType) -> RecordType {
        RecordType::from_code(u16::from(hickory_type))
    }
}
