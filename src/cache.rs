//! Route parse caching
//!
//! Memoises pathname → route lookups so repeated navigation events for the
//! same path skip the application's parser, with LRU eviction.

use crate::trace_log;
use lru::LruCache;
use std::num::NonZeroUsize;

/// Cache performance statistics
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CacheStats {
    pub hits: usize,
    pub misses: usize,
    pub invalidations: usize,
}

impl CacheStats {
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }
}

/// Parsed routes keyed by pathname, with LRU eviction
///
/// Only successful parses are stored; not-found fallbacks are resolved fresh
/// each time.
#[derive(Debug)]
pub struct RouteCache<R> {
    routes: LruCache<String, R>,
    stats: CacheStats,
}

impl<R: Clone> RouteCache<R> {
    pub const DEFAULT_CAPACITY: usize = 256;

    pub fn new() -> Self {
        Self::with_capacity(NonZeroUsize::new(Self::DEFAULT_CAPACITY).unwrap_or(NonZeroUsize::MIN))
    }

    pub fn with_capacity(capacity: NonZeroUsize) -> Self {
        Self {
            routes: LruCache::new(capacity),
            stats: CacheStats::default(),
        }
    }

    pub fn get(&mut self, path: &str) -> Option<R> {
        if let Some(route) = self.routes.get(path) {
            self.stats.hits += 1;
            trace_log!("Route cache hit for path: '{}'", path);
            Some(route.clone())
        } else {
            self.stats.misses += 1;
            trace_log!("Route cache miss for path: '{}'", path);
            None
        }
    }

    pub fn insert(&mut self, path: String, route: R) {
        self.routes.push(path, route);
    }

    pub fn clear(&mut self) {
        trace_log!("Clearing route cache");
        self.routes.clear();
        self.stats.invalidations += 1;
    }

    pub fn stats(&self) -> &CacheStats {
        &self.stats
    }

    pub fn reset_stats(&mut self) {
        self.stats = CacheStats::default();
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.routes.cap().get()
    }
}

impl<R: Clone> Default for RouteCache<R> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cap(n: usize) -> NonZeroUsize {
        NonZeroUsize::new(n).unwrap()
    }

    #[test]
    fn test_cache_creation() {
        let cache: RouteCache<u32> = RouteCache::new();
        assert!(cache.is_empty());
        assert_eq!(cache.capacity(), 256);
        assert_eq!(cache.stats().hits, 0);
    }

    #[test]
    fn test_cache_miss_then_hit() {
        let mut cache = RouteCache::new();
        assert_eq!(cache.get("/items/1"), None);

        cache.insert("/items/1".to_string(), 1_u32);
        assert_eq!(cache.get("/items/1"), Some(1));

        assert_eq!(cache.stats().misses, 1);
        assert_eq!(cache.stats().hits, 1);
    }

    #[test]
    fn test_lru_eviction() {
        let mut cache = RouteCache::with_capacity(cap(2));
        cache.insert("/a".to_string(), 'a');
        cache.insert("/b".to_string(), 'b');
        // touch /a so /b is the least recently used
        cache.get("/a");
        cache.insert("/c".to_string(), 'c');

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("/b"), None);
        assert_eq!(cache.get("/a"), Some('a'));
        assert_eq!(cache.get("/c"), Some('c'));
    }

    #[test]
    fn test_cache_clear() {
        let mut cache = RouteCache::new();
        cache.insert("/".to_string(), 0_u8);
        cache.clear();

        assert!(cache.is_empty());
        assert_eq!(cache.stats().invalidations, 1);
    }

    #[test]
    fn test_hit_rate_calculation() {
        let mut cache = RouteCache::new();
        cache.get("/a");
        cache.get("/b");
        cache.get("/c");

        cache.insert("/a".to_string(), 1_u8);
        cache.insert("/b".to_string(), 2_u8);

        cache.get("/a");
        cache.get("/b");

        assert_eq!(cache.stats().hits, 2);
        assert_eq!(cache.stats().misses, 3);
        assert!((cache.stats().hit_rate() - 0.4).abs() < 0.001);

        cache.reset_stats();
        assert_eq!(cache.stats(), &CacheStats::default());
    }
}
