pub mod bootstrap;
pub mod doh;
pub mod errors;
pub mod handler;
pub mod logging;
pub mod root;
pub mod server;

pub use bootstrap::BootstrapConfig;
pub use doh::DohConfig;
pub use errors::ConfigError;
pub use handler::HandlerConfig;
pub use logging::LoggingConfig;
pub use root::{CliOverrides, Config};
pub use server::ServerConfig;
