//! Memoization of reply counts and flattened lists.
//!
//! Counting and flattening are pure functions of the snapshot, so results
//! can be cached under `(GraphVersion, root id)`. A new snapshot produces a
//! new version and therefore never hits a stale entry.
//!
//! ## Cache Key Design
//!
//! The key is the graph version plus the root id. Policy settings are not
//! part of the key: they only affect composition, never the cached values.

use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use lru::LruCache;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::store::GraphVersion;
use crate::types::CommentId;

/// Configuration for the thread cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// Maximum number of entries per cache.
    pub max_entries: usize,
    /// Whether to enable the cache.
    pub enabled: bool,
}

impl CacheConfig {
    /// A configuration with caching turned off.
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Self::default()
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            max_entries: 1024,
            enabled: true,
        }
    }
}

type CacheKey = (GraphVersion, CommentId);

/// LRU caches for counts and flattened reply lists.
///
/// Thread-safe; a composer holding one can be shared by reference.
pub struct ThreadCache {
    counts: Option<RwLock<LruCache<CacheKey, usize>>>,
    flattened: Option<RwLock<LruCache<CacheKey, Arc<[CommentId]>>>>,
    hits: AtomicU64,
    misses: AtomicU64,
}

impl ThreadCache {
    /// Create caches per `config`.
    pub fn new(config: &CacheConfig) -> Self {
        Self {
            counts: config.enabled.then(|| new_lru(config)),
            flattened: config.enabled.then(|| new_lru(config)),
            hits: AtomicU64::new(0),
            misses: AtomicU64::new(0),
        }
    }

    /// Cached reply count, computing it on a miss.
    pub fn count_with<F>(&self, version: GraphVersion, root: &CommentId, compute: F) -> usize
    where
        F: FnOnce() -> usize,
    {
        let Some(cache) = &self.counts else {
            return compute();
        };

        let key = (version, root.clone());
        if let Some(&count) = cache.read().peek(&key) {
            self.record_hit(root);
            return count;
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let count = compute();
        cache.write().put(key, count);
        count
    }

    /// Cached flattened list, computing it on a miss.
    pub fn flattened_with<F>(&self, version: GraphVersion, root: &CommentId, compute: F) -> Arc<[CommentId]>
    where
        F: FnOnce() -> Vec<CommentId>,
    {
        let Some(cache) = &self.flattened else {
            return compute().into();
        };

        let key = (version, root.clone());
        if let Some(flat) = cache.read().peek(&key) {
            self.record_hit(root);
            return Arc::clone(flat);
        }

        self.misses.fetch_add(1, Ordering::Relaxed);
        let flat: Arc<[CommentId]> = compute().into();
        cache.write().put(key, Arc::clone(&flat));
        flat
    }

    fn record_hit(&self, root: &CommentId) {
        self.hits.fetch_add(1, Ordering::Relaxed);
        tracing::trace!(root = %root, "Thread cache hit");
    }

    /// Get cache statistics.
    ///
    /// Returns `None` if caching is disabled.
    pub fn stats(&self) -> Option<CacheStats> {
        let (counts, flattened) = (self.counts.as_ref()?, self.flattened.as_ref()?);
        let counts = counts.read();
        Some(CacheStats {
            counts_len: counts.len(),
            flattened_len: flattened.read().len(),
            cap: counts.cap().get(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        })
    }

    /// Drop every cached entry.
    ///
    /// Does nothing if caching is disabled.
    pub fn clear(&self) {
        if let Some(cache) = &self.counts {
            cache.write().clear();
        }
        if let Some(cache) = &self.flattened {
            cache.write().clear();
        }
    }
}

fn new_lru<V>(config: &CacheConfig) -> RwLock<LruCache<CacheKey, V>> {
    let size = NonZeroUsize::new(config.max_entries).unwrap_or(NonZeroUsize::MIN);
    RwLock::new(LruCache::new(size))
}

impl std::fmt::Debug for ThreadCache {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThreadCache")
            .field("enabled", &self.counts.is_some())
            .field("stats", &self.stats())
            .finish()
    }
}

/// Cache statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CacheStats {
    /// Cached reply counts.
    pub counts_len: usize,
    /// Cached flattened lists.
    pub flattened_len: usize,
    /// Maximum capacity of each cache.
    pub cap: usize,
    /// Lookups answered from cache.
    pub hits: u64,
    /// Lookups that had to compute.
    pub misses: u64,
}
