//! Query cache: bounded, LRU-evicted, per-entry TTL, backed by moka.
//!
//! One instance is created at startup and shared by reference with every
//! retrieval call. `clear()` exists for test isolation and index reloads.

use std::sync::Arc;
use std::time::Duration;

use lodestar_core::config::CacheConfig;
use lodestar_core::intent::Intent;
use lodestar_core::models::CacheEntry;
use lodestar_core::SearchResult;
use moka::policy::EvictionPolicy;
use moka::sync::Cache;

/// Retrieval mode tag folded into every cache key.
pub const HYBRID_MODE: &str = "hybrid";

/// Parameters that determine a retrieval result, hashed into a cache key.
#[derive(Debug, Clone, Copy)]
pub struct CacheKey<'a> {
    pub query: &'a str,
    pub mode: &'a str,
    pub limit: usize,
    pub intent: Intent,
    pub rrf_k: u32,
    pub min_score: f64,
}

impl CacheKey<'_> {
    /// Canonical key. Queries differing only in case or whitespace share an entry.
    pub fn digest(&self) -> String {
        let normalized = self
            .query
            .split_whitespace()
            .collect::<Vec<_>>()
            .join(" ")
            .to_lowercase();
        let canonical = format!(
            "{}|{}|{}|k={}|min={}|{}",
            self.mode,
            self.limit,
            self.intent.as_str(),
            self.rrf_k,
            self.min_score,
            normalized
        );
        blake3::hash(canonical.as_bytes()).to_hex().to_string()
    }
}

/// Memoized fused result lists keyed by [`CacheKey::digest`].
///
/// Values are stored behind an `Arc`, so a reader always sees either the old
/// or the new entry for a key, never a partial write.
pub struct QueryCache {
    cache: Cache<String, Arc<CacheEntry<Vec<SearchResult>>>>,
}

impl QueryCache {
    pub fn new(max_entries: u64, ttl: Duration) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_entries)
            .time_to_live(ttl)
            .eviction_policy(EvictionPolicy::lru())
            .build();
        Self { cache }
    }

    pub fn from_config(config: &CacheConfig) -> Self {
        Self::new(config.max_entries, config.ttl())
    }

    /// Cached results for `key`. Reading does not extend the entry's lifetime.
    pub fn get(&self, key: &str) -> Option<Vec<SearchResult>> {
        self.cache.get(key).map(|entry| entry.value.clone())
    }

    /// Full entry including its creation time.
    pub fn entry(&self, key: &str) -> Option<Arc<CacheEntry<Vec<SearchResult>>>> {
        self.cache.get(key)
    }

    /// Insert or replace the entry for `key`.
    pub fn set(&self, key: String, value: Vec<SearchResult>) {
        let entry = Arc::new(CacheEntry::new(key.clone(), value));
        self.cache.insert(key, entry);
    }

    pub fn contains(&self, key: &str) -> bool {
        self.cache.contains_key(key)
    }

    pub fn invalidate(&self, key: &str) {
        self.cache.invalidate(key);
    }

    pub fn clear(&self) {
        self.cache.invalidate_all();
        self.cache.run_pending_tasks();
    }

    /// Approximate entry count; eviction bookkeeping runs lazily.
    pub fn len(&self) -> u64 {
        self.cache.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply pending evictions now. Mostly useful before asserting on `len`.
    pub fn run_pending_tasks(&self) {
        self.cache.run_pending_tasks();
    }
}

impl Default for QueryCache {
    fn default() -> Self {
        Self::from_config(&CacheConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use lodestar_core::models::ScoreDebug;

    use super::*;

    fn result(id: &str, score: f64) -> SearchResult {
        SearchResult {
            chunk_id: id.to_string(),
            score,
            debug: ScoreDebug {
                rrf_score: score,
                ..Default::default()
            },
        }
    }

    fn key(query: &str, limit: usize) -> String {
        CacheKey {
            query,
            mode: HYBRID_MODE,
            limit,
            intent: Intent::General,
            rrf_k: 60,
            min_score: 0.01,
        }
        .digest()
    }

    #[test]
    fn set_then_get_returns_value() {
        let cache = QueryCache::new(16, Duration::from_secs(60));
        let k = key("bgp neighbor", 5);
        cache.set(k.clone(), vec![result("a", 0.5)]);
        assert_eq!(cache.get(&k), Some(vec![result("a", 0.5)]));
    }

    #[test]
    fn miss_is_none() {
        let cache = QueryCache::new(16, Duration::from_secs(60));
        assert!(cache.get("absent").is_none());
    }

    #[test]
    fn last_write_wins() {
        let cache = QueryCache::new(16, Duration::from_secs(60));
        cache.set("k".into(), vec![result("a", 0.5)]);
        cache.set("k".into(), vec![result("b", 0.4)]);
        assert_eq!(cache.get("k"), Some(vec![result("b", 0.4)]));
    }

    #[test]
    fn entries_expire_after_ttl() {
        let cache = QueryCache::new(16, Duration::from_millis(100));
        cache.set("k".into(), vec![result("a", 0.5)]);
        assert!(cache.get("k").is_some());
        std::thread::sleep(Duration::from_millis(250));
        assert!(cache.get("k").is_none());
    }

    #[test]
    fn clear_drops_everything() {
        let cache = QueryCache::new(16, Duration::from_secs(60));
        cache.set("a".into(), vec![]);
        cache.set("b".into(), vec![]);
        cache.clear();
        assert!(cache.get("a").is_none());
        assert!(cache.get("b").is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn capacity_is_bounded() {
        let cache = QueryCache::new(4, Duration::from_secs(60));
        for i in 0..32 {
            cache.set(format!("k{i}"), vec![]);
        }
        cache.run_pending_tasks();
        assert!(cache.len() <= 4);
    }

    #[test]
    fn key_normalizes_case_and_whitespace_only() {
        assert_eq!(key("BGP  neighbor", 5), key("bgp neighbor", 5));
        assert_ne!(key("bgp neighbor", 5), key("bgp neighbor", 10));
        assert_ne!(key("bgp neighbor", 5), key("ospf neighbor", 5));
        let configuration = CacheKey {
            query: "bgp neighbor",
            mode: HYBRID_MODE,
            limit: 5,
            intent: Intent::Configuration,
            rrf_k: 60,
            min_score: 0.01,
        };
        assert_ne!(configuration.digest(), key("bgp neighbor", 5));
    }

    #[test]
    fn entry_records_key() {
        let cache = QueryCache::new(16, Duration::from_secs(60));
        cache.set("k".into(), vec![result("a", 0.5)]);
        let entry = cache.entry("k").expect("entry present");
        assert_eq!(entry.key, "k");
        assert_eq!(entry.value.len(), 1);
    }
}
