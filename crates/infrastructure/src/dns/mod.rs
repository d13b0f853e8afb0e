pub mod bootstrap;
pub mod forwarding;
pub mod record_encoder;
pub mod server;
pub mod transport;

pub use bootstrap::BootstrapResolver;
pub use record_encoder::RecordEncoder;
pub use server::DnsServerHandler;
