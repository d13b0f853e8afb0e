use std::fmt;

/// Resource record types the bridge knows how to re-encode.
///
/// Anything else the DoH backend returns is carried as `Unsupported(code)`
/// instead of being relabelled as an A record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RecordType {
    A,
    AAAA,
    CNAME,
    MX,
    Unsupported(u16),
}

impl RecordType {
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => RecordType::A,
            5 => RecordType::CNAME,
            15 => RecordType::MX,
            28 => RecordType::AAAA,
            other => RecordType::Unsupported(other),
        }
    }

    pub fn code(&self) -> u16 {
        match self {
            RecordType::A => 1,
            RecordType::CNAME => 5,
            RecordType::MX => 15,
            RecordType::AAAA => 28,
            RecordType::Unsupported(code) => *code,
        }
    }

    /// Canonical mnemonic, `None` for unsupported types.
    pub fn as_str(&self) -> Option<&'static str> {
        match self {
            RecordType::A => Some("A"),
            RecordType::AAAA => Some("AAAA"),
            RecordType::CNAME => Some("CNAME"),
            RecordType::MX => Some("MX"),
            RecordType::Unsupported(_) => None,
        }
    }
}

impl fmt::Display for RecordType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.as_str() {
            Some(tag) => f.write_str(tag),
            None => write!(f, "TYPE{}", self.code()),
        }
    }
}

impl From<u16> for RecordType {
    fn from(code: u16) -> Self {
        Self::from_code(code)
    }
}
