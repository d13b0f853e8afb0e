use clap::Parser;
use doh_bridge_domain::CliOverrides;
use std::time::Duration;
use tracing::{error, info};

mod bootstrap;
mod di;
mod server;

#[global_allocator]
static GLOBAL: mimalloc::MiMalloc = mimalloc::MiMalloc;

#[derive(Parser)]
#[command(name = "doh-bridge")]
#[command(version)]
#[command(about = "DNS over UDP/TCP answered from a DNS-over-HTTPS JSON API")]
struct Cli {
    /// Configuration file path
    #[arg(short = 'c', long, value_name = "FILE")]
    config: Option<String>,

    /// DNS server port
    #[arg(short = 'd', long)]
    dns_port: Option<u16>,

    /// Bind address
    #[arg(short = 'b', long)]
    bind: Option<String>,

    /// Bootstrap DNS authority (ip:port)
    #[arg(long)]
    authority: Option<String>,

    /// DoH JSON provider host name
    #[arg(long)]
    doh_host: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long)]
    log_level: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let cli_overrides = CliOverrides {
        dns_port: cli.dns_port,
        bind_address: cli.bind,
        authority: cli.authority,
        doh_host: cli.doh_host,
        log_level: cli.log_level,
    };

    let (config, config_file) = bootstrap::load_config(cli.config.as_deref(), cli_overrides)?;

    bootstrap::init_logging(&config);

    info!("Starting doh-bridge v{}", env!("CARGO_PKG_VERSION"));
    info!(
        config_file = config_file.as_deref().unwrap_or("default"),
        dns_port = config.server.dns_port,
        bind = %config.server.bind_address,
        authority = %config.bootstrap.authority,
        doh_host = %config.doh.host,
        "Configuration loaded"
    );

    // Nothing listens until the DoH endpoint is known.
    let services = match di::DnsServices::new(&config).await {
        Ok(services) => services,
        Err(e) => {
            error!(error = %e, "Bootstrap failed, exiting");
            return Err(e);
        }
    };

    let dns_server = server::bind_dns_server(
        config.listen_addr()?,
        Duration::from_secs(config.server.tcp_timeout_secs),
        services.handler,
    )?;

    info!(endpoint = %services.endpoint, "Ready to answer queries");

    server::serve_until_shutdown(dns_server).await?;

    info!("Server shutdown complete");
    Ok(())
}
