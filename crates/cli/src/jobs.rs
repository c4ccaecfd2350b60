use ferrous_resolver_infrastructure::dns::TtlCache;
use std::sync::Arc;
use std::time::Duration;
use tokio_util::sync::CancellationToken;
use tracing::info;

const DEFAULT_PURGE_INTERVAL_SECS: u64 = 60;

/// Periodically drops expired cache entries.
pub struct CachePurgeJob {
    cache: Arc<TtlCache>,
    interval_secs: u64,
    shutdown: CancellationToken,
}

impl CachePurgeJob {
    pub fn new(cache: Arc<TtlCache>) -> Self {
        Self {
            cache,
            interval_secs: DEFAULT_PURGE_INTERVAL_SECS,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_interval(mut self, interval_secs: u64) -> Self {
        self.interval_secs = interval_secs.max(1);
        self
    }

    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.shutdown = token;
        self
    }

    pub fn start(self: Arc<Self>) {
        info!(interval_secs = self.interval_secs, "Starting cache purge job");

        tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_secs(self.interval_secs));
            loop {
                tokio::select! {
                    _ = self.shutdown.cancelled() => {
                        info!("CachePurgeJob: shutting down");
                        break;
                    }
                    _ = interval.tick() => {
                        let removed = self.cache.purge_expired();
                        if removed > 0 {
                            info!(
                                entries_removed = removed,
                                cache_size = self.cache.len(),
                                "Cache purge cycle completed"
                            );
                        }
                    }
                }
            }
        });
    }
}
