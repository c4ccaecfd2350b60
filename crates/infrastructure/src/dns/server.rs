use ferrous_resolver_application::ports::DnsResolver;
use ferrous_resolver_domain::config::ServerConfig;
use ferrous_resolver_domain::wire::MAX_UDP_PAYLOAD;
use ferrous_resolver_domain::{DomainError, Message};
use socket2::{Domain, Protocol, Socket, Type};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::UdpSocket;
use tokio::sync::{OwnedSemaphorePermit, Semaphore};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

const SOCKET_BUFFER_SIZE: usize = 512 * 1024;

/// UDP front end. Every datagram is handled on its own task; concurrency is
/// unbounded unless [`UdpServer::with_max_in_flight`] is set.
pub struct UdpServer {
    socket: Arc<UdpSocket>,
    resolver: Arc<dyn DnsResolver>,
    limiter: Option<Arc<Semaphore>>,
    recv_buffer_size: usize,
}

impl UdpServer {
    pub async fn bind(addr: SocketAddr, resolver: Arc<dyn DnsResolver>) -> Result<Self, DomainError> {
        let socket = create_udp_socket(addr)?;
        Ok(Self {
            socket: Arc::new(socket),
            resolver,
            limiter: None,
            recv_buffer_size: MAX_UDP_PAYLOAD,
        })
    }

    pub async fn from_config(
        addr: SocketAddr,
        config: &ServerConfig,
        resolver: Arc<dyn DnsResolver>,
    ) -> Result<Self, DomainError> {
        let server = Self::bind(addr, resolver)
            .await?
            .with_recv_buffer_size(config.recv_buffer_size);
        Ok(match config.max_in_flight {
            Some(limit) => server.with_max_in_flight(limit),
            None => server,
        })
    }

    pub fn with_max_in_flight(mut self, limit: usize) -> Self {
        self.limiter = Some(Arc::new(Semaphore::new(limit.max(1))));
        self
    }

    pub fn with_recv_buffer_size(mut self, size: usize) -> Self {
        self.recv_buffer_size = size.clamp(512, MAX_UDP_PAYLOAD);
        self
    }

    pub fn local_addr(&self) -> Result<SocketAddr, DomainError> {
        Ok(self.socket.local_addr()?)
    }

    /// Runs the accept loop on a background task.
    pub fn spawn(self) -> Result<ServerHandle, DomainError> {
        let local_addr = self.local_addr()?;
        let shutdown = CancellationToken::new();
        let task = tokio::spawn(self.run(shutdown.clone()));
        Ok(ServerHandle {
            local_addr,
            shutdown,
            task,
        })
    }

    /// Receives until `shutdown` fires. Tasks already spawned run to completion.
    pub async fn run(self, shutdown: CancellationToken) {
        let local_addr = self.local_addr().ok();
        info!(bind_address = ?local_addr, "DNS server listening");

        let mut recv_buf = vec![0u8; self.recv_buffer_size];

        loop {
            let permit = match self.acquire_permit(&shutdown).await {
                Some(permit) => permit,
                None => break,
            };

            let (len, peer) = tokio::select! {
                _ = shutdown.cancelled() => break,
                result = self.socket.recv_from(&mut recv_buf) => match result {
                    Ok(received) => received,
                    Err(e) => {
                        warn!(error = %e, "UDP recv error");
                        continue;
                    }
                },
            };

            let datagram = recv_buf[..len].to_vec();
            let socket = Arc::clone(&self.socket);
            let resolver = Arc::clone(&self.resolver);
            tokio::spawn(async move {
                handle_datagram(socket, resolver, datagram, peer).await;
                drop(permit);
            });
        }

        info!(bind_address = ?local_addr, "DNS server stopped");
    }

    /// `Some(None)` when unbounded; `None` once shutdown was requested.
    async fn acquire_permit(
        &self,
        shutdown: &CancellationToken,
    ) -> Option<Option<OwnedSemaphorePermit>> {
        let Some(limiter) = &self.limiter else {
            return Some(None);
        };
        tokio::select! {
            _ = shutdown.cancelled() => None,
            permit = Arc::clone(limiter).acquire_owned() => permit.ok().map(Some),
        }
    }
}

/// Decode, resolve, encode in place over the received query, reply. Any failure is
/// logged and the datagram dropped without a reply.
async fn handle_datagram(
    socket: Arc<UdpSocket>,
    resolver: Arc<dyn DnsResolver>,
    mut buf: Vec<u8>,
    peer: SocketAddr,
) {
    let query = match Message::decode(&buf) {
        Ok(query) => query,
        Err(e) => {
            warn!(client = %peer, bytes = buf.len(), error = %e, "Dropping malformed query");
            return;
        }
    };

    debug!(
        client = %peer,
        id = query.header.id,
        domain = %query.header.query_name,
        record_type = %query.header.query_type,
        "DNS query received"
    );

    let answer = match resolver.resolve(&query, &CancellationToken::new()).await {
        Ok(answer) => answer,
        Err(e) => {
            error!(
                client = %peer,
                domain = %query.header.query_name,
                error = %e,
                "Query resolution failed"
            );
            return;
        }
    };

    buf.resize(MAX_UDP_PAYLOAD, 0);
    let len = match answer.encode_into(&mut buf) {
        Ok(len) => len,
        Err(e) => {
            error!(client = %peer, domain = %query.header.query_name, error = %e, "Failed to encode response");
            return;
        }
    };

    if let Err(e) = socket.send_to(&buf[..len], peer).await {
        error!(client = %peer, error = %e, "Failed to send response");
    }
}

fn create_udp_socket(addr: SocketAddr) -> Result<UdpSocket, DomainError> {
    let domain = if addr.is_ipv4() {
        Domain::IPV4
    } else {
        Domain::IPV6
    };

    let socket = Socket::new(domain, Type::DGRAM, Some(Protocol::UDP))?;
    if addr.is_ipv6() {
        socket.set_only_v6(false)?;
    }
    socket.set_reuse_address(true)?;
    socket.set_recv_buffer_size(SOCKET_BUFFER_SIZE)?;
    socket.set_send_buffer_size(SOCKET_BUFFER_SIZE)?;
    socket.bind(&addr.into())?;
    socket.set_nonblocking(true)?;

    let std_socket: std::net::UdpSocket = socket.into();
    Ok(UdpSocket::from_std(std_socket)?)
}

/// Running server started by [`UdpServer::spawn`].
pub struct ServerHandle {
    local_addr: SocketAddr,
    shutdown: CancellationToken,
    task: JoinHandle<()>,
}

impl ServerHandle {
    pub fn local_addr(&self) -> SocketAddr {
        self.local_addr
    }

    /// Stops the accept loop and waits for it to exit.
    pub async fn shutdown(self) {
        self.shutdown.cancel();
        if let Err(e) = self.task.await {
            error!(error = %e, "DNS server task failed");
        }
    }
}
