pub mod dns;

pub use dns::{bind_dns_server, serve_until_shutdown};
