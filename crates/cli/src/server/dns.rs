use doh_bridge_infrastructure::dns::DnsServerHandler;
use hickory_server::ServerFuture;
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use std::time::Duration;
use tokio::net::{TcpListener, UdpSocket};
use tracing::{error, info};

/// Bind UDP and TCP on `socket_addr` and hand both to hickory's server loop.
pub fn bind_dns_server(
    socket_addr: SocketAddr,
    tcp_timeout: Duration,
    handler: DnsServerHandler,
) -> anyhow::Result<ServerFuture<DnsServerHandler>> {
    let domain = if socket_addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let udp_socket = create_udp_socket(domain, socket_addr)?;
    let tcp_listener = create_tcp_listener(domain, socket_addr)?;

    let mut server = ServerFuture::new(handler);
    server.register_socket(udp_socket);
    server.register_listener(tcp_listener, tcp_timeout);

    info!(bind_address = %socket_addr, "DNS server listening (UDP + TCP)");
    Ok(server)
}

/// Drive the server until its sockets fail or Ctrl-C arrives.
pub async fn serve_until_shutdown(
    mut server: ServerFuture<DnsServerHandler>,
) -> anyhow::Result<()> {
    let result = tokio::select! {
        result = server.block_until_done() => result.map_err(anyhow::Error::from),
        signal = tokio::signal::ctrl_c() => {
            info!("Shutdown signal received");
            signal.map_err(anyhow::Error::from)
        }
    };

    log_closed(&result);
    result
}

/// Every exit path ends with exactly one closed event.
fn log_closed(result: &anyhow::Result<()>) {
    match result {
        Ok(()) => info!("DNS server closed"),
        Err(e) => error!(error = %e, "DNS server closed with error"),
    }
}

fn create_udp_socket(domain: Domain, socket_addr: SocketAddr) -> anyhow::Result<UdpSocket> {
    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.set_recv_buffer_size(512 * 1024)?;
    socket.set_send_buffer_size(512 * 1024)?;
    socket.bind(&socket_addr.into())?;
    socket.set_nonblocking(true)?;
    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}

fn create_tcp_listener(domain: Domain, socket_addr: SocketAddr) -> anyhow::Result<TcpListener> {
    let socket = Socket::new(domain, Type::STREAM, Some(Protocol::TCP))?;
    if socket_addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.bind(&socket_addr.into())?;
    socket.listen(1024)?;
    socket.set_nonblocking(true)?;
    let std_listener: std::net::TcpListener = socket.into();
    Ok(TcpListener::from_std(std_listener)?)
}
