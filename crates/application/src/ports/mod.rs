mod doh_resolver;

pub use doh_resolver::DohResolver;

// Re-export for convenience
pub use doh_bridge_domain::{DnsRecord, Question};
