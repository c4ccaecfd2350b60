use super::builders::a_answer;
use ferrous_resolver_domain::Message;
use std::net::{Ipv4Addr, SocketAddr};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::sync::oneshot;

/// How the mock upstream answers each query.
#[derive(Clone, Copy, Debug)]
pub enum MockReply {
    /// One A record with the given TTL and address, after `delay`.
    Answer {
        ttl: u32,
        ip: Ipv4Addr,
        delay: Duration,
    },
    /// A garbage datagram first, then the real answer.
    GarbageThenAnswer { ttl: u32, ip: Ipv4Addr },
    /// Never replies.
    Silent,
}

pub struct MockDnsServer {
    addr: SocketAddr,
    received: Arc<AtomicUsize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockDnsServer {
    pub async fn start(reply: MockReply) -> Result<Self, std::io::Error> {
        let socket = Arc::new(UdpSocket::bind("127.0.0.1:0").await?);
        let addr = socket.local_addr()?;
        let received = Arc::new(AtomicUsize::new(0));

        let (shutdown_tx, mut shutdown_rx) = oneshot::channel();
        let counter = Arc::clone(&received);

        tokio::spawn(async move {
            let mut buf = vec![0u8; 65527];

            loop {
                tokio::select! {
                    _ = &mut shutdown_rx => {
                        break;
                    }
                    result = socket.recv_from(&mut buf) => {
                        if let Ok((len, peer)) = result {
                            counter.fetch_add(1, Ordering::SeqCst);
                            let Ok(query) = Message::decode(&buf[..len]) else {
                                continue;
                            };
                            let socket = Arc::clone(&socket);
                            tokio::spawn(Self::reply(socket, query, peer, reply));
                        }
                    }
                }
            }
        });

        Ok(Self {
            addr,
            received,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    async fn reply(socket: Arc<UdpSocket>, query: Message, peer: SocketAddr, reply: MockReply) {
        match reply {
            MockReply::Answer { ttl, ip, delay } => {
                if !delay.is_zero() {
                    tokio::time::sleep(delay).await;
                }
                let bytes = a_answer(&query, &[ttl], ip).to_vec().unwrap();
                let _ = socket.send_to(&bytes, peer).await;
            }
            MockReply::GarbageThenAnswer { ttl, ip } => {
                let _ = socket.send_to(&[0xde, 0xad, 0xbe], peer).await;
                let bytes = a_answer(&query, &[ttl], ip).to_vec().unwrap();
                let _ = socket.send_to(&bytes, peer).await;
            }
            MockReply::Silent => {}
        }
    }

    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// Datagrams received so far.
    pub fn received(&self) -> usize {
        self.received.load(Ordering::SeqCst)
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
