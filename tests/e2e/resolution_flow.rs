//! Whole-process flows: bootstrap against a fake authority, then answer
//! real UDP/TCP DNS queries from a fake DoH JSON backend.

#[path = "../../crates/infrastructure/tests/helpers/mod.rs"]
mod helpers;

use doh_bridge_application::use_cases::HandleDnsRequestUseCase;
use doh_bridge_domain::{DohConfig, DomainError};
use doh_bridge_infrastructure::dns::{BootstrapResolver, DnsServerHandler};
use doh_bridge_infrastructure::doh::HttpsJsonResolver;
use helpers::{MockAuthorityBehavior, MockDnsServer, MockDohServer, MockReply};
use hickory_proto::op::{Message, MessageType, OpCode, Query, ResponseCode};
use hickory_proto::rr::{Name, RData, RecordType};
use hickory_proto::serialize::binary::BinEncodable;
use hickory_server::ServerFuture;
use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream, UdpSocket};

const DOH_HOST: &str = "doh.test";

struct RunningBridge {
    _server: ServerFuture<DnsServerHandler>,
    udp: SocketAddr,
    tcp: SocketAddr,
}

fn doh_config(doh: &MockDohServer) -> DohConfig {
    DohConfig {
        host: DOH_HOST.to_string(),
        port: doh.addr().port(),
        tls: false,
        ..DohConfig::default()
    }
}

/// Same order as the binary: bootstrap first, listeners only afterwards.
async fn start(
    authority: &MockDnsServer,
    doh: &MockDohServer,
) -> Result<RunningBridge, DomainError> {
    let config = doh_config(doh);
    let bootstrap = BootstrapResolver::new(authority.addr(), Duration::from_millis(300));
    let endpoint = bootstrap.resolve_endpoint(&config).await?;

    let resolver = Arc::new(HttpsJsonResolver::new(endpoint, &config)?);
    let use_case = Arc::new(
        HandleDnsRequestUseCase::new(resolver).with_deadline(Some(Duration::from_secs(5))),
    );

    let udp_socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    let tcp_listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let udp = udp_socket.local_addr().unwrap();
    let tcp = tcp_listener.local_addr().unwrap();

    let mut server = ServerFuture::new(DnsServerHandler::new(use_case));
    server.register_socket(udp_socket);
    server.register_listener(tcp_listener, Duration::from_secs(5));

    Ok(RunningBridge {
        _server: server,
        udp,
        tcp,
    })
}

fn query(id: u16, questions: &[(&str, RecordType)]) -> Message {
    let mut message = Message::new(id, MessageType::Query, OpCode::Query);
    message.set_recursion_desired(true);
    for (name, record_type) in questions {
        message.add_query(Query::query(Name::from_str(name).unwrap(), *record_type));
    }
    message
}

async fn exchange_udp(server: SocketAddr, message: &Message) -> Message {
    let socket = UdpSocket::bind("127.0.0.1:0").await.unwrap();
    socket
        .send_to(&message.to_bytes().unwrap(), server)
        .await
        .unwrap();

    let mut buf = vec![0u8; 4096];
    let (len, _) = tokio::time::timeout(Duration::from_secs(5), socket.recv_from(&mut buf))
        .await
        .expect("no UDP response")
        .unwrap();
    Message::from_vec(&buf[..len]).unwrap()
}

async fn exchange_tcp(server: SocketAddr, message: &Message) -> Message {
    let mut stream = TcpStream::connect(server).await.unwrap();
    let bytes = message.to_bytes().unwrap();
    stream
        .write_all(&(bytes.len() as u16).to_be_bytes())
        .await
        .unwrap();
    stream.write_all(&bytes).await.unwrap();

    let mut len = [0u8; 2];
    stream.read_exact(&mut len).await.unwrap();
    let mut buf = vec![0u8; u16::from_be_bytes(len) as usize];
    stream.read_exact(&mut buf).await.unwrap();
    Message::from_vec(&buf).unwrap()
}

fn a_addresses(response: &Message) -> Vec<Ipv4Addr> {
    let mut addresses: Vec<Ipv4Addr> = response
        .answers()
        .iter()
        .filter_map(|r| match r.data() {
            RData::A(a) => Some(a.0),
            _ => None,
        })
        .collect();
    addresses.sort();
    addresses
}

#[tokio::test]
async fn test_complete_resolution_flow_udp_and_tcp() {
    let doh = MockDohServer::start().await;
    doh.set_answers("example.com", &[(1, 300, "93.184.216.34")]);
    let authority = MockDnsServer::answering(&[[127, 0, 0, 1]]).await;

    let bridge = start(&authority, &doh).await.unwrap();

    let udp = exchange_udp(bridge.udp, &query(1, &[("example.com.", RecordType::A)])).await;
    assert_eq!(udp.id(), 1);
    assert_eq!(udp.response_code(), ResponseCode::NoError);
    assert_eq!(a_addresses(&udp), vec![Ipv4Addr::new(93, 184, 216, 34)]);

    let tcp = exchange_tcp(bridge.tcp, &query(2, &[("example.com.", RecordType::A)])).await;
    assert_eq!(tcp.id(), 2);
    assert_eq!(a_addresses(&tcp), vec![Ipv4Addr::new(93, 184, 216, 34)]);

    let seen = doh.requests();
    assert_eq!(seen.len(), 2);
    assert!(seen.iter().all(|r| r
        .host
        .as_deref()
        .is_some_and(|h| h.starts_with(DOH_HOST))));
}

#[tokio::test]
async fn test_multi_question_request_aggregates_all_answers() {
    let doh = MockDohServer::start().await;
    doh.set_answers("a.example.com", &[(1, 60, "10.0.0.1")]);
    doh.set_answers("b.example.com", &[(1, 60, "10.0.0.2"), (1, 60, "10.0.0.3")]);
    let authority = MockDnsServer::answering(&[[127, 0, 0, 1]]).await;
    let bridge = start(&authority, &doh).await.unwrap();

    let response = exchange_tcp(
        bridge.tcp,
        &query(
            3,
            &[
                ("a.example.com.", RecordType::A),
                ("b.example.com.", RecordType::A),
            ],
        ),
    )
    .await;

    assert_eq!(response.response_code(), ResponseCode::NoError);
    assert_eq!(
        a_addresses(&response),
        vec![
            Ipv4Addr::new(10, 0, 0, 1),
            Ipv4Addr::new(10, 0, 0, 2),
            Ipv4Addr::new(10, 0, 0, 3)
        ]
    );
    assert_eq!(doh.request_count(), 2);
}

#[tokio::test]
async fn test_questions_are_dispatched_concurrently() {
    let doh = MockDohServer::start().await;
    for (name, ip) in [("one.test", "10.1.0.1"), ("two.test", "10.1.0.2")] {
        doh.set_reply(
            name,
            MockReply::json(format!(
                r#"{{"Status":0,"Answer":[{{"name":"{}.","type":1,"TTL":60,"data":"{}"}}]}}"#,
                name, ip
            ))
            .delayed(Duration::from_millis(300)),
        );
    }
    let authority = MockDnsServer::answering(&[[127, 0, 0, 1]]).await;
    let bridge = start(&authority, &doh).await.unwrap();

    let started = Instant::now();
    let response = exchange_tcp(
        bridge.tcp,
        &query(4, &[("one.test.", RecordType::A), ("two.test.", RecordType::A)]),
    )
    .await;

    assert_eq!(response.answers().len(), 2);
    assert!(
        started.elapsed() < Duration::from_millis(550),
        "dispatches should overlap, took {:?}",
        started.elapsed()
    );
}

#[tokio::test]
async fn test_failed_question_is_dropped_not_servfail() {
    let doh = MockDohServer::start().await;
    doh.set_answers("good.test", &[(1, 60, "10.0.0.1")]);
    doh.set_reply(
        "bad.test",
        MockReply::status(axum::http::StatusCode::BAD_GATEWAY),
    );
    let authority = MockDnsServer::answering(&[[127, 0, 0, 1]]).await;
    let bridge = start(&authority, &doh).await.unwrap();

    let response = exchange_tcp(
        bridge.tcp,
        &query(5, &[("bad.test.", RecordType::A), ("good.test.", RecordType::A)]),
    )
    .await;

    assert_eq!(response.response_code(), ResponseCode::NoError);
    assert_eq!(a_addresses(&response), vec![Ipv4Addr::new(10, 0, 0, 1)]);
}

#[tokio::test]
async fn test_bootstrap_timeout_prevents_serving() {
    let doh = MockDohServer::start().await;
    let authority = MockDnsServer::start(MockAuthorityBehavior::Silent)
        .await
        .unwrap();

    let result = start(&authority, &doh).await;

    assert!(matches!(result, Err(DomainError::BootstrapTimeout { .. })));
    assert_eq!(doh.request_count(), 0);
}

#[tokio::test]
async fn test_bootstrap_uses_last_address() {
    let doh = MockDohServer::start().await;
    let authority = MockDnsServer::answering(&[[10, 9, 9, 9], [127, 0, 0, 1]]).await;

    let endpoint = BootstrapResolver::new(authority.addr(), Duration::from_millis(300))
        .resolve_endpoint(&doh_config(&doh))
        .await
        .unwrap();

    assert_eq!(endpoint.address(), IpAddr::V4(Ipv4Addr::LOCALHOST));
}
