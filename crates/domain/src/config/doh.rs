use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DohConfig {
    /// Service name of the DoH JSON provider; resolved once at startup.
    pub host: String,

    pub port: u16,

    /// `false` talks plain HTTP to the backend (local providers and tests).
    pub tls: bool,

    /// Path of the JSON resolve endpoint, relative to the base URL.
    pub resolve_path: String,

    /// Per HTTPS request timeout, in seconds.
    pub request_timeout_secs: u64,

    /// Also send `type=<code>`; off by default, the provider then answers for A.
    pub send_query_type: bool,

    pub pool_max_idle_per_host: usize,
}

impl Default for DohConfig {
    fn default() -> Self {
        Self {
            host: "dns.google.com".to_string(),
            port: 443,
            tls: true,
            resolve_path: "resolve".to_string(),
            request_timeout_secs: 5,
            send_query_type: false,
            pool_max_idle_per_host: 4,
        }
    }
}
