// this_file: src/cache.rs

//! Caller-owned render cache.
//!
//! Rendering is a pure function of `(seed, major, minor, material)`, so a
//! cached document never goes stale and the cache needs no invalidation. The
//! library core never consults this cache on its own; batch processing takes
//! one through [`crate::ExecutionOptions`].

use crate::compose::TokenAttributes;
use crate::seed::Seed;
use lru::LruCache;
use serde::Serialize;
use std::num::NonZeroUsize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};

/// Content key of one rendered document.
#[derive(Clone, Debug, Hash, PartialEq, Eq)]
pub struct RenderKey {
    pub seed: Seed,
    pub major_id: u32,
    pub minor_id: u32,
    pub material_id: u32,
}

impl From<&TokenAttributes> for RenderKey {
    fn from(attributes: &TokenAttributes) -> Self {
        Self {
            seed: attributes.seed().clone(),
            major_id: attributes.major().id(),
            minor_id: attributes.minor().id(),
            material_id: attributes.material_id(),
        }
    }
}

/// Snapshot of cache occupancy and effectiveness.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct RenderCacheStats {
    pub entries: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
}

/// Shared LRU of rendered SVG documents.
#[derive(Clone, Debug)]
pub struct RenderCache {
    inner: Arc<Mutex<LruCache<RenderKey, Arc<str>>>>,
    hits: Arc<AtomicU64>,
    misses: Arc<AtomicU64>,
}

impl RenderCache {
    /// Create a cache with the requested capacity. Returns `None` when disabled.
    pub fn new(capacity: usize) -> Option<Self> {
        NonZeroUsize::new(capacity).map(|cap| Self {
            inner: Arc::new(Mutex::new(LruCache::new(cap))),
            hits: Arc::new(AtomicU64::new(0)),
            misses: Arc::new(AtomicU64::new(0)),
        })
    }

    /// Retrieve a cached document if present.
    pub fn get(&self, key: &RenderKey) -> Option<Arc<str>> {
        let mut guard = self.inner.lock().expect("render cache mutex poisoned");
        let hit = guard.get(key).cloned();
        let counter = if hit.is_some() { &self.hits } else { &self.misses };
        counter.fetch_add(1, Ordering::Relaxed);
        hit
    }

    /// Insert a rendered document.
    pub fn insert(&self, key: RenderKey, svg: Arc<str>) {
        self.inner
            .lock()
            .expect("render cache mutex poisoned")
            .put(key, svg);
    }

    /// Return the cached document or render, store and return it.
    pub fn get_or_render<E>(
        &self,
        key: RenderKey,
        render: impl FnOnce() -> Result<String, E>,
    ) -> Result<(Arc<str>, bool), E> {
        if let Some(svg) = self.get(&key) {
            return Ok((svg, true));
        }
        let svg: Arc<str> = Arc::from(render()?);
        self.insert(key, Arc::clone(&svg));
        Ok((svg, false))
    }

    /// Current stats.
    pub fn stats(&self) -> RenderCacheStats {
        let guard = self.inner.lock().expect("render cache mutex poisoned");
        RenderCacheStats {
            entries: guard.len(),
            capacity: guard.cap().get(),
            hits: self.hits.load(Ordering::Relaxed),
            misses: self.misses.load(Ordering::Relaxed),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(seed: &str, major_id: u32) -> RenderKey {
        RenderKey {
            seed: Seed::new(seed).unwrap(),
            major_id,
            minor_id: 0,
            material_id: 3,
        }
    }

    #[test]
    fn render_cache_stores_and_retrieves_documents() {
        let cache = RenderCache::new(4).expect("cache enabled");
        cache.insert(key("a", 1), Arc::from("<svg/>"));
        assert_eq!(cache.get(&key("a", 1)).as_deref(), Some("<svg/>"));
        assert!(cache.get(&key("a", 2)).is_none());
        let stats = cache.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.entries, 1);
    }

    #[test]
    fn get_or_render_only_renders_once() {
        let cache = RenderCache::new(2).expect("cache enabled");
        let mut calls = 0;
        for _ in 0..3 {
            let (svg, _) = cache
                .get_or_render::<()>(key("b", 0), || {
                    calls += 1;
                    Ok("<svg/>".to_string())
                })
                .unwrap();
            assert_eq!(&*svg, "<svg/>");
        }
        assert_eq!(calls, 1);
    }

    #[test]
    fn render_errors_are_not_cached() {
        let cache = RenderCache::new(2).expect("cache enabled");
        let result = cache.get_or_render(key("c", 0), || Err("boom"));
        assert_eq!(result.unwrap_err(), "boom");
        assert_eq!(cache.stats().entries, 0);
    }

    #[test]
    fn least_recently_used_entry_is_evicted() {
        let cache = RenderCache::new(2).expect("cache enabled");
        cache.insert(key("d", 0), Arc::from("0"));
        cache.insert(key("d", 1), Arc::from("1"));
        assert!(cache.get(&key("d", 0)).is_some());
        cache.insert(key("d", 2), Arc::from("2"));
        assert!(cache.get(&key("d", 1)).is_none());
        assert_eq!(cache.stats().entries, 2);
        assert_eq!(cache.stats().capacity, 2);
    }

    #[test]
    fn zero_capacity_means_no_cache() {
        assert!(RenderCache::new(0).is_none());
    }
}
