use super::entry::CacheEntry;
use super::key::CacheKey;
use async_trait::async_trait;
use dashmap::DashMap;
use ferrous_resolver_application::ports::DnsResolver;
use ferrous_resolver_domain::{DomainError, Message};
use rustc_hash::FxBuildHasher;
use std::sync::Arc;
use tokio::sync::watch;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::debug;

type InflightSender = Arc<watch::Sender<Option<Arc<Message>>>>;

/// Removes the leader's own in-flight entry when it finishes or is dropped,
/// so followers never wait on a leader that went away. An entry registered
/// by a later leader under the same key is left alone.
struct InflightLeaderGuard {
    inflight: Arc<DashMap<CacheKey, InflightSender, FxBuildHasher>>,
    key: CacheKey,
    tx: InflightSender,
    completed: bool,
}

impl InflightLeaderGuard {
    fn release(&self, outcome: Option<Arc<Message>>) {
        self.inflight
            .remove_if(&self.key, |_, v| Arc::ptr_eq(v, &self.tx));
        self.tx.send_replace(outcome);
    }

    fn complete(mut self, answer: Arc<Message>) {
        self.release(Some(answer));
        self.completed = true;
    }
}

impl Drop for InflightLeaderGuard {
    fn drop(&mut self) {
        if !self.completed {
            self.release(None);
        }
    }
}

enum InflightRole {
    Leader(InflightSender),
    Follower(watch::Receiver<Option<Arc<Message>>>),
}

/// Answer cache keyed by question, in front of another resolver.
///
/// Only answers with at least one answer record are stored, for the
/// smallest TTL among them. Hits are served as owned copies with the
/// caller's id and TTLs reduced by the time spent in the cache.
pub struct TtlCache {
    inner: Arc<dyn DnsResolver>,
    entries: DashMap<CacheKey, CacheEntry, FxBuildHasher>,
    inflight: Arc<DashMap<CacheKey, InflightSender, FxBuildHasher>>,
}

impl TtlCache {
    pub fn new(inner: Arc<dyn DnsResolver>) -> Self {
        Self {
            inner,
            entries: DashMap::with_hasher(FxBuildHasher),
            inflight: Arc::new(DashMap::with_hasher(FxBuildHasher)),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drops expired entries, returning how many were removed.
    pub fn purge_expired(&self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired(now));
        let removed = before.saturating_sub(self.entries.len());
        if removed > 0 {
            debug!(removed, remaining = self.entries.len(), "Purged expired cache entries");
        }
        removed
    }

    fn check_cache(&self, key: &CacheKey, id: u16) -> Option<Message> {
        let now = Instant::now();
        let entry = self.entries.get(key)?;
        if entry.is_expired(now) {
            drop(entry);
            self.entries.remove_if(key, |_, e| e.is_expired(now));
            return None;
        }

        debug!(
            domain = %key.domain,
            record_type = %key.record_type,
            age_secs = entry.age_secs(now),
            "Cache HIT"
        );
        Some(entry.materialize(id, now))
    }

    fn store_in_cache(&self, key: CacheKey, answer: &Arc<Message>) {
        let Some(ttl) = answer.min_answer_ttl() else {
            debug!(domain = %key.domain, "Not caching answer without records");
            return;
        };
        if ttl == 0 {
            return;
        }
        self.entries
            .insert(key, CacheEntry::new(Arc::clone(answer), ttl, Instant::now()));
    }

    /// Sends the question upstream under a fresh id and restores the caller's.
    async fn forward(
        &self,
        query: &Message,
        cancel: &CancellationToken,
    ) -> Result<Message, DomainError> {
        let mut forwarded = query.clone();
        forwarded.header.id = fresh_id(query.header.id);
        let mut answer = self.inner.resolve(&forwarded, cancel).await?;
        answer.header.id = query.header.id;
        Ok(answer)
    }

    fn register_or_join_inflight(&self, key: &CacheKey) -> InflightRole {
        match self.inflight.entry(key.clone()) {
            dashmap::Entry::Occupied(e) => InflightRole::Follower(e.get().subscribe()),
            dashmap::Entry::Vacant(e) => {
                let (tx, _rx) = watch::channel(None::<Arc<Message>>);
                let tx = Arc::new(tx);
                e.insert(Arc::clone(&tx));
                InflightRole::Leader(tx)
            }
        }
    }

    async fn resolve_as_follower(
        &self,
        query: &Message,
        cancel: &CancellationToken,
        mut rx: watch::Receiver<Option<Arc<Message>>>,
    ) -> Result<Message, DomainError> {
        let shared = tokio::select! {
            _ = cancel.cancelled() => return Err(DomainError::Cancelled),
            shared = rx.wait_for(Option::is_some) => shared.ok().and_then(|v| (*v).clone()),
        };

        if let Some(answer) = shared {
            let mut answer = Message::clone(&answer);
            answer.header.id = query.header.id;
            return Ok(answer);
        }

        // Leader failed; its error is not shared, so ask upstream directly.
        self.forward(query, cancel).await
    }

    async fn resolve_as_leader(
        &self,
        query: &Message,
        cancel: &CancellationToken,
        key: CacheKey,
        tx: InflightSender,
    ) -> Result<Message, DomainError> {
        debug!(
            domain = %key.domain,
            record_type = %key.record_type,
            "Cache MISS"
        );

        let guard = InflightLeaderGuard {
            inflight: Arc::clone(&self.inflight),
            key: key.clone(),
            tx,
            completed: false,
        };

        let answer = Arc::new(self.forward(query, cancel).await?);
        self.store_in_cache(key, &answer);
        guard.complete(Arc::clone(&answer));

        Ok(Arc::try_unwrap(answer).unwrap_or_else(|shared| Message::clone(&shared)))
    }
}

/// A transaction id for the forwarded copy that never equals the caller's.
fn fresh_id(caller: u16) -> u16 {
    let id = fastrand::u16(..);
    if id == caller {
        id.wrapping_add(1)
    } else {
        id
    }
}

#[async_trait]
impl DnsResolver for TtlCache {
    async fn resolve(
        &self,
        query: &Message,
        cancel: &CancellationToken,
    ) -> Result<Message, DomainError> {
        let key = CacheKey::from_query(query);

        if let Some(cached) = self.check_cache(&key, query.header.id) {
            return Ok(cached);
        }

        match self.register_or_join_inflight(&key) {
            InflightRole::Follower(rx) => self.resolve_as_follower(query, cancel, rx).await,
            InflightRole::Leader(tx) => self.resolve_as_leader(query, cancel, key, tx).await,
        }
    }
}
