use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::time::Duration;

use super::bootstrap::BootstrapConfig;
use super::doh::DohConfig;
use super::errors::ConfigError;
use super::handler::HandlerConfig;
use super::logging::LoggingConfig;
use super::server::ServerConfig;

const LOCAL_CONFIG_PATH: &str = "doh-bridge.toml";
const SYSTEM_CONFIG_PATH: &str = "/etc/doh-bridge/config.toml";

/// Main configuration structure for doh-bridge
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
pub struct Config {
    /// DNS listener (port, bind address)
    #[serde(default)]
    pub server: ServerConfig,

    /// Startup resolution of the DoH provider
    #[serde(default)]
    pub bootstrap: BootstrapConfig,

    /// DoH JSON backend
    #[serde(default)]
    pub doh: DohConfig,

    /// Per-request fan-out behaviour
    #[serde(default)]
    pub handler: HandlerConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Load configuration from file or use defaults
    ///
    /// Priority order:
    /// 1. Explicitly provided path
    /// 2. doh-bridge.toml in current directory
    /// 3. /etc/doh-bridge/config.toml
    /// 4. Default configuration
    pub fn load(path: Option<&str>, cli_overrides: CliOverrides) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => match Self::get_config_path() {
                Some(found) => Self::from_file(&found)?,
                None => Self::default(),
            },
        };

        config.apply_cli_overrides(cli_overrides);
        Ok(config)
    }

    /// Load configuration from a specific file
    pub fn from_file(path: &str) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::FileRead(path.to_string(), e.to_string()))?;
        toml::from_str(&contents).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Apply command-line overrides to configuration
    fn apply_cli_overrides(&mut self, overrides: CliOverrides) {
        if let Some(port) = overrides.dns_port {
            self.server.dns_port = port;
        }
        if let Some(bind) = overrides.bind_address {
            self.server.bind_address = bind;
        }
        if let Some(authority) = overrides.authority {
            self.bootstrap.authority = authority;
        }
        if let Some(host) = overrides.doh_host {
            self.doh.host = host;
        }
        if let Some(level) = overrides.log_level {
            self.logging.level = level;
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.server.dns_port == 0 {
            return Err(ConfigError::Validation("DNS port cannot be 0".to_string()));
        }

        self.listen_addr()?;
        self.authority_addr()?;

        if self.bootstrap.timeout_ms == 0 {
            return Err(ConfigError::Validation(
                "Bootstrap timeout cannot be 0".to_string(),
            ));
        }

        if self.doh.host.trim().is_empty() {
            return Err(ConfigError::Validation("DoH host cannot be empty".to_string()));
        }

        if self.doh.port == 0 {
            return Err(ConfigError::Validation("DoH port cannot be 0".to_string()));
        }

        Ok(())
    }

    pub fn listen_addr(&self) -> Result<SocketAddr, ConfigError> {
        let addr = self.server.listen_address();
        addr.parse().map_err(|_| {
            ConfigError::Validation(format!("Invalid bind address '{}'", addr))
        })
    }

    pub fn authority_addr(&self) -> Result<SocketAddr, ConfigError> {
        self.bootstrap.authority.parse().map_err(|_| {
            ConfigError::Validation(format!(
                "Invalid bootstrap authority '{}' (expected ip:port)",
                self.bootstrap.authority
            ))
        })
    }

    pub fn bootstrap_timeout(&self) -> Duration {
        Duration::from_millis(self.bootstrap.timeout_ms)
    }

    /// `None` when the per-request deadline is disabled.
    pub fn request_deadline(&self) -> Option<Duration> {
        match self.handler.request_deadline_ms {
            0 => None,
            ms => Some(Duration::from_millis(ms)),
        }
    }

    /// Get the path to the configuration file being used
    pub fn get_config_path() -> Option<String> {
        if std::path::Path::new(LOCAL_CONFIG_PATH).exists() {
            Some(LOCAL_CONFIG_PATH.to_string())
        } else if std::path::Path::new(SYSTEM_CONFIG_PATH).exists() {
            Some(SYSTEM_CONFIG_PATH.to_string())
        } else {
            None
        }
    }
}

/// Command-line overrides for configuration
#[derive(Debug, Default)]
pub struct CliOverrides {
    pub dns_port: Option<u16>,
    pub bind_address: Option<String>,
    pub authority: Option<String>,
    pub doh_host: Option<String>,
    pub log_level: Option<String>,
}
