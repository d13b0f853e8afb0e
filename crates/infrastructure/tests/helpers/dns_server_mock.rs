#![allow(dead_code)]
use std::net::{Ipv4Addr, SocketAddr};
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// How the mock authority answers every query it receives.
#[derive(Debug, Clone)]
pub enum MockAuthorityBehavior {
    /// One A record per address, in order.
    Answer(Vec<Ipv4Addr>),
    /// Never reply.
    Silent,
    /// Reply with a flipped transaction ID.
    WrongId(Vec<Ipv4Addr>),
    /// A flipped-ID reply first, then the correct one.
    WrongIdThenAnswer(Vec<Ipv4Addr>),
}

/// Plain-UDP DNS authority on 127.0.0.1 with an OS-assigned port.
pub struct MockDnsServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(behavior: MockAuthorityBehavior) -> Result<Self, std::io::Error> {
        let socket = UdpSocket::bind(SocketAddr::from(([127, 0, 0, 1], 0))).await?;
        let addr = socket.local_addr()?;

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            let mut buf = vec![0u8; 512];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            if let MockAuthorityBehavior::WrongIdThenAnswer(addresses) = &behavior {
                                let stray = MockAuthorityBehavior::WrongId(addresses.clone());
                                if let Some(response) = Self::build_mock_response(&buf[..len], &stray) {
                                    let _ = socket.send_to(&response, peer).await;
                                }
                            }
                            if let Some(response) = Self::build_mock_response(&buf[..len], &behavior) {
                                let _ = socket.send_to(&response, peer).await;
                            }
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    pub async fn answering(addresses: &[[u8; 4]]) -> Self {
        Self::start(MockAuthorityBehavior::Answer(
            addresses.iter().map(|ip| Ipv4Addr::from(*ip)).collect(),
        ))
        .await
        .unwrap()
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Echo the question and append one compressed A record per address.
    fn build_mock_response(query: &[u8], behavior: &MockAuthorityBehavior) -> Option<Vec<u8>> {
        if query.len() < 12 {
            return None;
        }

        let (addresses, flip_id) = match behavior {
            MockAuthorityBehavior::Silent => return None,
            MockAuthorityBehavior::Answer(addresses)
            | MockAuthorityBehavior::WrongIdThenAnswer(addresses) => (addresses, false),
            MockAuthorityBehavior::WrongId(addresses) => (addresses, true),
        };

        let mut response = Vec::with_capacity(512);

        if flip_id {
            response.extend_from_slice(&[!query[0], !query[1]]);
        } else {
            response.extend_from_slice(&query[0..2]);
        }

        // QR=1 RD=1, RA=1 NOERROR
        response.push(0x81);
        response.push(0x80);

        // QDCOUNT, ANCOUNT, NSCOUNT, ARCOUNT
        response.extend_from_slice(&query[4..6]);
        response.extend_from_slice(&(addresses.len() as u16).to_be_bytes());
        response.extend_from_slice(&[0x00, 0x00]);
        response.extend_from_slice(&[0x00, 0x00]);

        response.extend_from_slice(&query[12..]);

        for ip in addresses {
            response.extend_from_slice(&[
                0xc0, 0x0c, // name pointer to the question
                0x00, 0x01, // TYPE A
                0x00, 0x01, // CLASS IN
                0x00, 0x00, 0x00, 0x3c, // TTL 60
                0x00, 0x04,
            ]);
            response.extend_from_slice(&ip.octets());
        }

        Some(response)
    }

    pub fn shutdown(mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockDnsServer {
    fn drop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}
