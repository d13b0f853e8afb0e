use serde::{Deserialize, Serialize};

/// One-shot resolution of the DoH provider's host name at startup.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct BootstrapConfig {
    /// Conventional resolver queried over UDP, `ip:port`.
    pub authority: String,

    /// Reply deadline for the bootstrap query, in milliseconds.
    pub timeout_ms: u64,
}

impl Default for BootstrapConfig {
    fn default() -> Self {
        Self {
            authority: "8.8.8.8:53".to_string(),
            timeout_ms: 1000,
        }
    }
}
