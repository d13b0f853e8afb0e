use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Invalid domain name: {0}")]
    InvalidDomainName(String),

    #[error("Malformed answer data for {record_type}: {data:?}")]
    MalformedAnswer { record_type: String, data: String },

    #[error("Bootstrap query to {authority} timed out")]
    BootstrapTimeout { authority: String },

    #[error("Bootstrap resolution failed: {0}")]
    BootstrapFailed(String),

    #[error("Invalid DNS response: {0}")]
    InvalidDnsResponse(String),

    #[error("DoH transport error: {0}")]
    DohTransport(String),

    #[error("DoH server returned HTTP {0}")]
    DohHttpStatus(u16),

    #[error("DoH server returned status {0}")]
    DohStatus(u32),

    #[error("Invalid DoH payload: {0}")]
    InvalidDohPayload(String),

    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Query timeout")]
    QueryTimeout,

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl DomainError {
    /// Short stable label used in structured log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            DomainError::InvalidDomainName(_) => "invalid_domain",
            DomainError::MalformedAnswer { .. } => "malformed_answer",
            DomainError::BootstrapTimeout { .. } => "bootstrap_timeout",
            DomainError::BootstrapFailed(_) => "bootstrap_failed",
            DomainError::InvalidDnsResponse(_) => "invalid_dns_response",
            DomainError::DohTransport(_) => "transport",
            DomainError::DohHttpStatus(_) => "http_status",
            DomainError::DohStatus(_) => "doh_status",
            DomainError::InvalidDohPayload(_) => "invalid_payload",
            DomainError::IoError(_) => "io",
            DomainError::QueryTimeout => "timeout",
            DomainError::ConfigError(_) => "config",
        }
    }
}
