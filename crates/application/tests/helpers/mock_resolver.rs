use async_trait::async_trait;
use ferrous_resolver_application::ports::DnsResolver;
use ferrous_resolver_domain::{DomainError, Message};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use tokio_util::sync::CancellationToken;

/// Answers every query with an empty NOERROR response, or a fixed error.
pub struct MockDnsResolver {
    calls: AtomicUsize,
    error: Mutex<Option<DomainError>>,
}

impl MockDnsResolver {
    pub fn new() -> Self {
        Self {
            calls: AtomicUsize::new(0),
            error: Mutex::new(None),
        }
    }

    pub fn failing(error: DomainError) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            error: Mutex::new(Some(error)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DnsResolver for MockDnsResolver {
    async fn resolve(
        &self,
        query: &Message,
        _cancel: &CancellationToken,
    ) -> Result<Message, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(error) = self.error.lock().unwrap().clone() {
            return Err(error);
        }
        Ok(Message::response_to(query))
    }
}
