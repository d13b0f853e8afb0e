use doh_bridge_application::use_cases::HandleDnsRequestUseCase;
use doh_bridge_domain::{Config, DohEndpoint};
use doh_bridge_infrastructure::dns::{BootstrapResolver, DnsServerHandler};
use doh_bridge_infrastructure::doh::HttpsJsonResolver;
use std::sync::Arc;
use tracing::info;

pub struct DnsServices {
    pub endpoint: DohEndpoint,
    pub handler: DnsServerHandler,
}

impl DnsServices {
    /// Bootstrap the DoH endpoint, then build the request path on top of it.
    ///
    /// Fails without retry when bootstrap fails; nothing is listening yet.
    pub async fn new(config: &Config) -> anyhow::Result<Self> {
        let bootstrap = BootstrapResolver::new(config.authority_addr()?, config.bootstrap_timeout());
        let endpoint = bootstrap.resolve_endpoint(&config.doh).await?;

        info!(
            endpoint = %endpoint.base_url(),
            address = %endpoint.address(),
            "DoH endpoint fixed for process lifetime"
        );

        let resolver = Arc::new(HttpsJsonResolver::new(endpoint.clone(), &config.doh)?);
        let use_case = Arc::new(
            HandleDnsRequestUseCase::new(resolver).with_deadline(config.request_deadline()),
        );

        Ok(Self {
            endpoint,
            handler: DnsServerHandler::new(use_case),
        })
    }
}
