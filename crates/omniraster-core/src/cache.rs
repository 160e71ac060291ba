//! Two-level cache for baked tables
//!
//! Baking a font means drawing every glyph five times, once per style
//! palette, so a viewer that redraws on every scroll step wants to keep the
//! result around. L1 is a small map of the most recently inserted tables;
//! L2 is a bounded LRU behind it. Hits in L2 are promoted back into L1.

use lru::LruCache;
use parking_lot::RwLock;
use std::collections::HashMap;
use std::hash::Hash;
use std::num::NonZeroUsize;
use std::time::Instant;

/// A cached value with its insertion time
#[derive(Debug, Clone)]
pub struct CachedValue<T> {
    pub data: T,
    pub timestamp: Instant,
}

impl<T> CachedValue<T> {
    fn new(data: T) -> Self {
        Self {
            data,
            timestamp: Instant::now(),
        }
    }
}

/// Small map that evicts its oldest entry when full
pub struct L1Cache<K: Hash + Eq + Clone, V: Clone> {
    cache: RwLock<HashMap<K, CachedValue<V>>>,
    max_size: usize,
}

impl<K: Hash + Eq + Clone, V: Clone> L1Cache<K, V> {
    pub fn new(max_size: usize) -> Self {
        Self {
            cache: RwLock::new(HashMap::with_capacity(max_size)),
            max_size: max_size.max(1),
        }
    }

    pub fn get(&self, key: &K) -> Option<V> {
        self.cache.read().get(key).map(|entry| entry.data.clone())
    }

    pub fn insert(&self, key: K, value: V) {
        let mut cache = self.cache.write();
        if cache.len() >= self.max_size && !cache.contains_key(&key) {
            if let Some(oldest) = cache
                .iter()
                .min_by_key(|(_, v)| v.timestamp)
                .map(|(k, _)| k.clone())
            {
                cache.remove(&oldest);
            }
        }
        cache.insert(key, CachedValue::new(value));
    }

    pub fn clear(&self) {
        self.cache.write().clear();
    }
}

/// Bounded LRU behind the L1 map
pub struct L2Cache<K: Hash + Eq + Clone, V: Clone> {
    cache: RwLock<LruCache<K, V>>,
}

const DEFAULT_L2_CAPACITY: NonZeroUsize = match NonZeroUsize::new(64) {
    Some(v) => v,
    None => unreachable!(),
};

impl<K: Hash + Eq + Clone, V: Clone> L2Cache<K, V> {
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(DEFAULT_L2_CAPACITY);
        Self {
            cache: RwLock::new(LruCache::new(capacity)),
        }
    }

    /// Lookup also refreshes the entry's recency
    pub fn get(&self, key: &K) -> Option<V> {
        self.cache.write().get(key).cloned()
    }

    pub fn insert(&self, key: K, value: V) {
        self.cache.write().put(key, value);
    }

    pub fn clear(&self) {
        self.cache.write().clear();
    }
}

/// L1 and L2 together, with hit accounting
pub struct MultiLevelCache<K: Hash + Eq + Clone, V: Clone> {
    l1: L1Cache<K, V>,
    l2: L2Cache<K, V>,
    stats: RwLock<CacheMetrics>,
}

impl<K: Hash + Eq + Clone, V: Clone> MultiLevelCache<K, V> {
    pub fn new(l1_size: usize, l2_size: usize) -> Self {
        Self {
            l1: L1Cache::new(l1_size),
            l2: L2Cache::new(l2_size),
            stats: RwLock::new(CacheMetrics::default()),
        }
    }

    /// Look in L1, then L2; an L2 hit is copied up into L1
    pub fn get(&self, key: &K) -> Option<V> {
        let mut stats = self.stats.write();
        stats.total_requests += 1;

        if let Some(value) = self.l1.get(key) {
            stats.l1_hits += 1;
            return Some(value);
        }

        if let Some(value) = self.l2.get(key) {
            stats.l2_hits += 1;
            self.l1.insert(key.clone(), value.clone());
            return Some(value);
        }

        stats.misses += 1;
        None
    }

    pub fn insert(&self, key: K, value: V) {
        self.l1.insert(key.clone(), value.clone());
        self.l2.insert(key, value);
    }

    /// Drop every entry; metrics are kept
    pub fn clear(&self) {
        self.l1.clear();
        self.l2.clear();
    }

    pub fn hit_rate(&self) -> f64 {
        self.stats.read().hit_rate()
    }

    pub fn metrics(&self) -> CacheMetrics {
        self.stats.read().clone()
    }
}

/// Request counts across both levels
#[derive(Debug, Clone, Default)]
pub struct CacheMetrics {
    pub total_requests: u64,
    pub l1_hits: u64,
    pub l2_hits: u64,
    pub misses: u64,
}

impl CacheMetrics {
    pub fn hit_rate(&self) -> f64 {
        if self.total_requests == 0 {
            0.0
        } else {
            (self.l1_hits + self.l2_hits) as f64 / self.total_requests as f64
        }
    }
}
