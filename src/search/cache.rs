use lru::LruCache;
use parking_lot::Mutex;
use sha2::{Digest, Sha256};
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};
use tracing::debug;

use crate::utils::safe_truncate;

/// TTL + LRU cache for search result lists. Entries past their TTL count as
/// misses and are overwritten on the next set.
pub struct QueryCache<T> {
    cache: Mutex<LruCache<String, (T, Instant)>>,
    ttl: Duration,
    hits: AtomicU64,
    misses: AtomicU64,
}

#[derive(Debug, Default)]
pub struct CacheStats {
    pub hits: u64,
    pub misses: u64,
    pub size: usize,
    pub hit_rate: f64,
}

impl<T> QueryCache<T> {
    pub fn new(capacity: usize, ttl_secs: u64) -> Self {
        let capacity = NonZeroUsize::new(capacity.max(1)).unwrap_or(NonZeroUsize::MIN);
        Self {
            cache: Mutex::new(LruCache::new(capacity)),
            ttl: Duration::from_secs(ttl_secs),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    pub fn get(&self, key: &str) -> Option<T>
    where
        T: Clone,
    {
        let mut cache = self.cache.lock();
        if let Some((value, stored_at)) = cache.get(key) {
            if stored_at.elapsed() < self.ttl {
                self.hits.fetch_add(1, Ordering::Relaxed);
                debug!("query cache hit: {}", safe_truncate(key, 12));
                return Some(value.clone());
            }
        }
        self.misses.fetch_add(1, Ordering::Relaxed);
        None
    }

    pub fn set(&self, key: &str, value: T) {
        let mut cache = self.cache.lock();
        cache.put(key.to_string(), (value, Instant::now()));
    }

    /// Stable sha256 key over the parts that define a query.
    pub fn make_key(parts: &[&str]) -> String {
        let mut hasher = Sha256::new();
        for part in parts {
            hasher.update(part.as_bytes());
            hasher.update([0u8]);
        }
        format!("{:x}", hasher.finalize())
    }

    pub fn stats(&self) -> CacheStats {
        let hits = self.hits.load(Ordering::Relaxed);
        let misses = self.misses.load(Ordering::Relaxed);
        let total = hits + misses;
        let hit_rate = if total > 0 { hits as f64 / total as f64 } else { 0.0 };
        let cache = self.cache.lock();

        CacheStats {
            hits,
            misses,
            size: cache.len(),
            hit_rate,
        }
    }

    pub fn clear(&self) {
        let mut cache = self.cache.lock();
        cache.clear();
        self.hits.store(0, Ordering::Relaxed);
        self.misses.store(0, Ordering::Relaxed);
    }
}
