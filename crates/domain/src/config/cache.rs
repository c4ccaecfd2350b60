use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CacheConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    /// Seconds between sweeps of expired entries.
    #[serde(default = "default_purge_interval_secs")]
    pub purge_interval_secs: u64,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            purge_interval_secs: default_purge_interval_secs(),
        }
    }
}

fn default_true() -> bool {
    true
}

fn default_purge_interval_secs() -> u64 {
    60
}
