//! UDP transactional client (RFC 1035 §4.2.1)
//!
//! One connected socket is shared by every query. A single background loop
//! receives datagrams and hands each to its own task for decoding, which
//! then completes the pending transaction with the matching key. Queries
//! with an identical key that overlap in time share one datagram on the wire.

use super::key::TransactionKey;
use async_trait::async_trait;
use dashmap::DashMap;
use ferrous_resolver_application::ports::DnsResolver;
use ferrous_resolver_domain::wire::MAX_UDP_PAYLOAD;
use ferrous_resolver_domain::{DomainError, Message};
use rustc_hash::FxBuildHasher;
use std::net::{IpAddr, Ipv4Addr, Ipv6Addr, SocketAddr};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::UdpSocket;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(2);

type Outcome = Option<Result<Arc<Message>, DomainError>>;
type PendingSender = Arc<watch::Sender<Outcome>>;
type PendingTable = DashMap<TransactionKey, PendingSender, FxBuildHasher>;

pub struct UdpClient {
    socket: Arc<UdpSocket>,
    remote: SocketAddr,
    timeout: Duration,
    pending: Arc<PendingTable>,
    shutdown: CancellationToken,
}

impl UdpClient {
    /// Connects to `remote` with the default 2 second timeout.
    pub async fn connect(remote: SocketAddr) -> Result<Self, DomainError> {
        Self::with_timeout(remote, DEFAULT_TIMEOUT).await
    }

    pub async fn with_timeout(remote: SocketAddr, timeout: Duration) -> Result<Self, DomainError> {
        let bind_addr = if remote.is_ipv4() {
            SocketAddr::new(IpAddr::V4(Ipv4Addr::UNSPECIFIED), 0)
        } else {
            SocketAddr::new(IpAddr::V6(Ipv6Addr::UNSPECIFIED), 0)
        };

        let socket = UdpSocket::bind(bind_addr).await.map_err(|e| {
            DomainError::Transport(format!("Failed to bind UDP socket: {}", e))
        })?;
        socket.connect(remote).await.map_err(|e| {
            DomainError::Transport(format!("Failed to connect UDP socket to {}: {}", remote, e))
        })?;

        let client = Self {
            socket: Arc::new(socket),
            remote,
            timeout,
            pending: Arc::new(DashMap::with_hasher(FxBuildHasher)),
            shutdown: CancellationToken::new(),
        };
        client.spawn_receive_loop();

        debug!(server = %remote, timeout_ms = timeout.as_millis() as u64, "UDP client ready");
        Ok(client)
    }

    pub fn remote(&self) -> SocketAddr {
        self.remote
    }

    /// Number of transactions still awaiting a response or their timeout.
    pub fn in_flight(&self) -> usize {
        self.pending.len()
    }

    /// Sends `query` (or joins an identical one already on the wire) and
    /// waits for the matching response.
    ///
    /// Cancelling only abandons the wait for this caller; the pending entry
    /// stays until a response arrives or the timeout removes it.
    pub async fn query(
        &self,
        query: &Message,
        cancel: &CancellationToken,
    ) -> Result<Message, DomainError> {
        let bytes = query.to_vec()?;
        let key = TransactionKey::from_message(query);
        let (is_leader, rx) = self.register_or_join(&key);

        if is_leader {
            self.send_as_leader(&bytes, key).await;
        } else {
            debug!(
                id = query.header.id,
                domain = %query.header.query_name,
                "Joining in-flight transaction"
            );
        }

        let answer = tokio::select! {
            _ = cancel.cancelled() => return Err(DomainError::Cancelled),
            outcome = wait_for_outcome(rx) => outcome?,
        };

        let mut answer = Message::clone(&answer);
        answer.header.id = query.header.id;
        Ok(answer)
    }

    fn register_or_join(&self, key: &TransactionKey) -> (bool, watch::Receiver<Outcome>) {
        match self.pending.entry(key.clone()) {
            dashmap::Entry::Occupied(e) => {
                let rx = e.get().subscribe();
                drop(e);
                (false, rx)
            }
            dashmap::Entry::Vacant(e) => {
                let (tx, rx) = watch::channel(None);
                e.insert(Arc::new(tx));
                (true, rx)
            }
        }
    }

    async fn send_as_leader(&self, bytes: &[u8], key: TransactionKey) {
        let Some(tx) = self.pending.get(&key).map(|e| Arc::clone(e.value())) else {
            return;
        };

        self.spawn_reaper(key.clone(), Arc::clone(&tx));

        match self.socket.send(bytes).await {
            Ok(sent) => {
                debug!(server = %self.remote, id = key.id, bytes_sent = sent, "UDP query sent");
            }
            Err(e) => {
                warn!(server = %self.remote, id = key.id, error = %e, "UDP send failed");
                if self
                    .pending
                    .remove_if(&key, |_, v| Arc::ptr_eq(v, &tx))
                    .is_some()
                {
                    tx.send_replace(Some(Err(DomainError::Transport(format!(
                        "Failed to send UDP query to {}: {}",
                        self.remote, e
                    )))));
                }
            }
        }
    }

    /// Fails the transaction with a timeout unless it completes first.
    fn spawn_reaper(&self, key: TransactionKey, tx: PendingSender) {
        let pending = Arc::clone(&self.pending);
        let timeout = self.timeout;
        let remote = self.remote;

        tokio::spawn(async move {
            tokio::time::sleep(timeout).await;
            if pending
                .remove_if(&key, |_, v| Arc::ptr_eq(v, &tx))
                .is_some()
            {
                debug!(server = %remote, id = key.id, domain = %key.domain, "UDP query timed out");
                tx.send_replace(Some(Err(DomainError::QueryTimeout)));
            }
        });
    }

    fn spawn_receive_loop(&self) {
        let socket = Arc::clone(&self.socket);
        let pending = Arc::clone(&self.pending);
        let shutdown = self.shutdown.clone();
        let remote = self.remote;

        tokio::spawn(async move {
            let mut recv_buf = vec![0u8; MAX_UDP_PAYLOAD];

            loop {
                tokio::select! {
                    _ = shutdown.cancelled() => break,
                    result = socket.recv(&mut recv_buf) => match result {
                        Ok(len) => {
                            let datagram = recv_buf[..len].to_vec();
                            let pending = Arc::clone(&pending);
                            tokio::spawn(async move {
                                complete_pending(&pending, &datagram);
                            });
                        }
                        Err(e) => {
                            if shutdown.is_cancelled() {
                                break;
                            }
                            // Connected sockets surface ICMP errors here.
                            debug!(server = %remote, error = %e, "UDP receive error");
                        }
                    },
                }
            }

            debug!(server = %remote, "UDP receive loop stopped");
        });
    }
}

impl Drop for UdpClient {
    fn drop(&mut self) {
        self.shutdown.cancel();
    }
}

#[async_trait]
impl DnsResolver for UdpClient {
    async fn resolve(
        &self,
        query: &Message,
        cancel: &CancellationToken,
    ) -> Result<Message, DomainError> {
        self.query(query, cancel).await
    }
}

async fn wait_for_outcome(mut rx: watch::Receiver<Outcome>) -> Result<Arc<Message>, DomainError> {
    match rx.wait_for(Option::is_some).await {
        Ok(outcome) => (*outcome).clone().unwrap_or(Err(DomainError::QueryTimeout)),
        Err(_) => Err(DomainError::QueryTimeout),
    }
}

fn complete_pending(pending: &PendingTable, datagram: &[u8]) {
    let message = match Message::decode(datagram) {
        Ok(message) => message,
        Err(e) => {
            warn!(error = %e, bytes = datagram.len(), "Discarding undecodable UDP response");
            return;
        }
    };

    let key = TransactionKey::from_message(&message);
    match pending.remove(&key) {
        Some((_, tx)) => {
            tx.send_replace(Some(Ok(Arc::new(message))));
        }
        None => {
            debug!(id = key.id, domain = %key.domain, "Discarding response with no pending query");
        }
    }
}
