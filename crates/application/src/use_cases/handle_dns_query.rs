use crate::ports::{DnsResolver, QueryFilter};
use async_trait::async_trait;
use ferrous_resolver_domain::{DomainError, Message, ResponseCode};
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Runs queries past a [`QueryFilter`] before resolving them.
///
/// Denied queries are answered locally with `REFUSED` and never reach the
/// inner resolver.
pub struct HandleDnsQueryUseCase {
    resolver: Arc<dyn DnsResolver>,
    filter: Arc<dyn QueryFilter>,
}

impl HandleDnsQueryUseCase {
    pub fn new(resolver: Arc<dyn DnsResolver>, filter: Arc<dyn QueryFilter>) -> Self {
        Self { resolver, filter }
    }

    pub async fn execute(
        &self,
        query: &Message,
        cancel: &CancellationToken,
    ) -> Result<Message, DomainError> {
        if !self.filter.permits(query) {
            debug!(
                domain = %query.header.query_name,
                record_type = %query.header.query_type,
                "Query refused by filter"
            );
            return Ok(Message::error_response(query, ResponseCode::Refused));
        }

        self.resolver.resolve(query, cancel).await
    }
}

#[async_trait]
impl DnsResolver for HandleDnsQueryUseCase {
    async fn resolve(
        &self,
        query: &Message,
        cancel: &CancellationToken,
    ) -> Result<Message, DomainError> {
        self.execute(query, cancel).await
    }
}
