//! Fixed-capacity in-memory cache with least-recently-used eviction.
//!
//! Every entry carries an `evict_first` flag set at insert time. When the
//! cache is full, the least recently used `evict_first` entry is dropped
//! before any regular entry. The resolver marks not-found results this way so
//! they never push real pages out.

use std::borrow::Borrow;
use std::hash::Hash;
use std::num::NonZeroUsize;

use parking_lot::Mutex;

struct Entry<V> {
    value: V,
    evict_first: bool,
}

/// Thread-safe LRU cache.
///
/// Values are cloned out on `get`, so `V` is typically an `Arc` or another
/// cheap handle.
pub struct LruCache<K: Hash + Eq, V> {
    inner: Mutex<lru::LruCache<K, Entry<V>>>,
}

impl<K: Hash + Eq + Clone, V: Clone> LruCache<K, V> {
    /// Create a cache holding at most `capacity` entries.
    ///
    /// A capacity of zero is treated as one.
    #[must_use]
    pub fn new(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            inner: Mutex::new(lru::LruCache::new(capacity)),
        }
    }

    /// Look up a value and mark it as recently used.
    pub fn get<Q>(&self, key: &Q) -> Option<V>
    where
        K: Borrow<Q>,
        Q: Hash + Eq + ?Sized,
    {
        self.inner.lock().get(key).map(|entry| entry.value.clone())
    }

    /// Insert or replace a value.
    ///
    /// `evict_first` marks the entry as the preferred eviction victim.
    pub fn insert(&self, key: K, value: V, evict_first: bool) {
        let mut inner = self.inner.lock();

        if !inner.contains(&key) && inner.len() == inner.cap().get() {
            // `iter` runs most to least recently used.
            let victim = inner
                .iter()
                .rev()
                .find(|(_, entry)| entry.evict_first)
                .map(|(k, _)| k.clone());
            if let Some(victim) = victim {
                inner.pop(&victim);
            }
        }

        inner.put(key, Entry { value, evict_first });
    }

    /// Number of cached entries.
    pub fn len(&self) -> usize {
        self.inner.lock().len()
    }

    /// True when nothing is cached.
    pub fn is_empty(&self) -> bool {
        self.inner.lock().is_empty()
    }

    /// Maximum number of entries.
    pub fn capacity(&self) -> usize {
        self.inner.lock().cap().get()
    }

    /// Drop every entry.
    pub fn clear(&self) {
        self.inner.lock().clear();
    }
}
