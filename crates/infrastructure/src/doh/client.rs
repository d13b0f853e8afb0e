//! DoH JSON backend client (`GET <base>/resolve?name=<name>`).
//!
//! Success is transport success AND HTTP 200 AND `Status == 0`. Every other
//! outcome is a typed `DomainError`; the request aggregator turns it into an
//! empty contribution for that question.

use super::payload::DohPayload;
use super::record_mapper::RecordMapper;
use async_trait::async_trait;
use doh_bridge_application::ports::DohResolver;
use doh_bridge_domain::{DnsRecord, DohConfig, DohEndpoint, DomainError, Question};
use reqwest::header::ACCEPT;
use reqwest::{StatusCode, Url};
use std::time::{Duration, Instant};
use tracing::debug;

const DNS_JSON_CONTENT_TYPE: &str = "application/dns-json";

pub struct HttpsJsonResolver {
    client: reqwest::Client,
    resolve_url: Url,
    send_query_type: bool,
}

impl HttpsJsonResolver {
    /// Build the shared client for `endpoint`.
    ///
    /// The provider's host name is pinned to the bootstrapped address, so no
    /// further DNS lookups happen and TLS still validates against the name.
    pub fn new(endpoint: DohEndpoint, config: &DohConfig) -> Result<Self, DomainError> {
        let client = reqwest::Client::builder()
            .use_rustls_tls()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .pool_max_idle_per_host(config.pool_max_idle_per_host)
            .resolve(endpoint.host(), endpoint.socket_addr())
            .build()
            .map_err(|e| DomainError::DohTransport(format!("Failed to build HTTP client: {}", e)))?;

        let raw_url = format!(
            "{}/{}",
            endpoint.base_url(),
            config.resolve_path.trim_start_matches('/')
        );
        let resolve_url = Url::parse(&raw_url).map_err(|e| {
            DomainError::ConfigError(format!("Invalid DoH URL '{}': {}", raw_url, e))
        })?;

        debug!(url = %resolve_url, address = %endpoint.address(), "DoH client ready");

        Ok(Self {
            client,
            resolve_url,
            send_query_type: config.send_query_type,
        })
    }

    pub fn request_url(&self, question: &Question) -> Url {
        let mut url = self.resolve_url.clone();
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("name", &question.name);
            if self.send_query_type {
                pairs.append_pair("type", &question.record_type.code().to_string());
            }
        }
        url
    }
}

#[async_trait]
impl DohResolver for HttpsJsonResolver {
    async fn resolve(&self, question: &Question) -> Result<Vec<DnsRecord>, DomainError> {
        let url = self.request_url(question);
        let start = Instant::now();

        debug!(url = %url, domain = %question.name, "Sending DoH query");

        let response = self
            .client
            .get(url)
            .header(ACCEPT, DNS_JSON_CONTENT_TYPE)
            .send()
            .await
            .map_err(|e| DomainError::DohTransport(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(DomainError::DohHttpStatus(status.as_u16()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| DomainError::DohTransport(e.to_string()))?;

        let payload = DohPayload::from_slice(&body)?;
        if !payload.is_success() {
            return Err(DomainError::DohStatus(payload.status));
        }

        let records = RecordMapper::map_answers(&payload.answer)?;

        debug!(
            domain = %question.name,
            records = records.len(),
            body_len = body.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "DoH response received"
        );

        Ok(records)
    }
}
