//! TTL caches for upstream responses.
//!
//! Every GI call is billed, so each response is held briefly and served from
//! memory while it is fresh. Each concern builds its own cache with a fixed
//! time-to-live: search results go stale quickly, GPS details barely change.
//!
//! Expired entries are simply absent on the next lookup; there is no
//! invalidation path besides TTL and process restart.

use std::hash::Hash;
use std::time::Duration;

use moka::future::Cache as MokaCache;

/// In-memory cache whose entries expire a fixed duration after insertion.
///
/// Thin wrapper over `moka` pinning the time-to-live at construction.
/// Unbounded: cardinality is limited by the key space (queries and course
/// ids), which is small enough in practice.
pub struct TtlCache<K, V> {
    inner: MokaCache<K, V>,
}

impl<K, V> TtlCache<K, V>
where
    K: Hash + Eq + Send + Sync + 'static,
    V: Clone + Send + Sync + 'static,
{
    /// Create a cache whose entries live for `ttl` after insertion.
    pub fn new(ttl: Duration) -> Self {
        let inner = MokaCache::builder().time_to_live(ttl).build();
        Self { inner }
    }

    /// Get the stored value if present and unexpired.
    pub async fn get(&self, key: &K) -> Option<V> {
        self.inner.get(key).await
    }

    /// Store a value, overwriting any existing entry and restarting its TTL.
    pub async fn insert(&self, key: K, value: V) {
        self.inner.insert(key, value).await;
    }

    /// Number of live entries (for monitoring).
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }

    /// Drop all cached entries.
    pub fn invalidate_all(&self) {
        self.inner.invalidate_all();
    }
}
