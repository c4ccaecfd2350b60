use async_trait::async_trait;
use ferrous_resolver_application::ports::DnsResolver;
use ferrous_resolver_domain::{DomainError, Message};
use std::net::Ipv4Addr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio_util::sync::CancellationToken;

use super::builders::a_answer;

/// Answers every query with A records carrying `ttls`, counting calls.
pub struct CountingResolver {
    calls: AtomicUsize,
    ttls: Vec<u32>,
    delay: Duration,
    last_query: Mutex<Option<Message>>,
    error: Option<DomainError>,
}

impl CountingResolver {
    pub fn new(ttls: &[u32]) -> Self {
        Self {
            calls: AtomicUsize::new(0),
            ttls: ttls.to_vec(),
            delay: Duration::ZERO,
            last_query: Mutex::new(None),
            error: None,
        }
    }

    pub fn empty() -> Self {
        Self::new(&[])
    }

    pub fn failing(error: DomainError) -> Self {
        Self {
            error: Some(error),
            ..Self::new(&[])
        }
    }

    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// The most recent query received, as the caller sent it.
    pub fn last_query(&self) -> Option<Message> {
        self.last_query.lock().unwrap().clone()
    }
}

#[async_trait]
impl DnsResolver for CountingResolver {
    async fn resolve(
        &self,
        query: &Message,
        _cancel: &CancellationToken,
    ) -> Result<Message, DomainError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        *self.last_query.lock().unwrap() = Some(query.clone());

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        if let Some(error) = &self.error {
            return Err(error.clone());
        }
        Ok(a_answer(query, &self.ttls, Ipv4Addr::new(192, 0, 2, 1)))
    }
}
