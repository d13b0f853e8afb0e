pub mod dns_server_mock;

pub use dns_server_mock::{MockAuthorityBehavior, MockDnsServer};
pub use doh_server_mock::{MockDohServer, MockReply};
