use ferrous_resolver_domain::Message;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;

/// A cached answer and the window in which it may be served.
#[derive(Clone, Debug)]
pub struct CacheEntry {
    pub answer: Arc<Message>,
    pub inserted_at: Instant,
    pub expires_at: Instant,
}

impl CacheEntry {
    pub fn new(answer: Arc<Message>, ttl: u32, now: Instant) -> Self {
        Self {
            answer,
            inserted_at: now,
            expires_at: now + Duration::from_secs(u64::from(ttl)),
        }
    }

    #[inline]
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    /// Whole seconds since insertion.
    #[inline]
    pub fn age_secs(&self, now: Instant) -> u32 {
        let age = now.saturating_duration_since(self.inserted_at).as_secs();
        u32::try_from(age).unwrap_or(u32::MAX)
    }

    /// Owned copy of the answer with `id` stamped and every answer TTL
    /// reduced by the entry's age.
    pub fn materialize(&self, id: u16, now: Instant) -> Message {
        let age = self.age_secs(now);
        let mut answer = Message::clone(&self.answer);
        answer.header.id = id;
        for record in &mut answer.answers {
            record.ttl = record.ttl.saturating_sub(age);
        }
        answer
    }
}
