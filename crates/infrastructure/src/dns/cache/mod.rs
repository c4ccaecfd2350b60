pub mod entry;
pub mod key;
pub mod ttl_cache;

pub use entry::CacheEntry;
pub use key::CacheKey;
pub use ttl_cache::TtlCache;
