use async_trait::async_trait;
use ferrous_resolver_domain::{DomainError, Message};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Answers a DNS query message.
///
/// Implemented by the upstream UDP client, by the TTL cache that wraps it,
/// and by anything else the server can be pointed at. `cancel` abandons the
/// query for this caller only; it never affects other callers sharing the
/// same upstream transaction.
#[async_trait]
pub trait DnsResolver: Send + Sync {
    async fn resolve(
        &self,
        query: &Message,
        cancel: &CancellationToken,
    ) -> Result<Message, DomainError>;
}

#[async_trait]
impl<T: DnsResolver + ?Sized> DnsResolver for Arc<T> {
    async fn resolve(
        &self,
        query: &Message,
        cancel: &CancellationToken,
    ) -> Result<Message, DomainError> {
        (**self).resolve(query, cancel).await
    }
}
