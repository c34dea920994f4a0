// crates/geosearch-core/src/cache/mod.rs

//! # Result Cache
//!
//! A bounded, TTL-bounded record of past searches, persisted as one JSON
//! array under a single store key so it survives restarts.
//!
//! Reads go back to the store every time rather than keeping a private
//! copy: another process sharing the store may have written since. Writes
//! are best-effort; a failing store degrades the cache to "always miss"
//! and never fails a search.

use crate::clock::{Clock, SystemClock};
use crate::common::CacheStats;
use crate::config::CacheConfig;
use crate::dedup::{dedupe_by_id, rank_by_relevance};
use crate::error::StorageError;
use crate::model::SearchResult;
use crate::text::fold_key;
use crate::traits::NameMatch;
use serde::{Deserialize, Serialize};
use std::rc::Rc;
use tracing::{debug, warn};

mod store;

pub use store::{FileStore, KeyValueStore, MemoryStore};

/// One remembered search.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheEntry {
    pub query: String,
    pub results: Vec<SearchResult>,
    /// Insertion time, Unix epoch milliseconds.
    pub timestamp: i64,
}

fn same_query(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

/// Oldest-first sequence of [`CacheEntry`] with FIFO eviction.
///
/// Invariants held by every write:
/// - at most one entry per query, compared case-insensitively
/// - never more than `max_entries` entries
/// - no entry older than the TTL survives a write
pub struct ResultCache<S: KeyValueStore> {
    store: S,
    config: CacheConfig,
    max_display: usize,
    clock: Rc<dyn Clock>,
}

impl<S: KeyValueStore> ResultCache<S> {
    pub fn new(store: S, config: CacheConfig, max_display: usize) -> Self {
        Self::with_clock(store, config, max_display, Rc::new(SystemClock))
    }

    pub fn with_clock(
        store: S,
        config: CacheConfig,
        max_display: usize,
        clock: Rc<dyn Clock>,
    ) -> Self {
        Self {
            store,
            config,
            max_display,
            clock,
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// All persisted entries, oldest first, expired ones included.
    ///
    /// A missing key is a first run; an unreadable or unparsable value is
    /// logged and treated the same way.
    pub fn load(&self) -> Vec<CacheEntry> {
        let raw = match self.store.read(&self.config.storage_key) {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(e) => {
                warn!(error = %e, "search cache unreadable, treating as empty");
                return Vec::new();
            }
        };

        match serde_json::from_str(&raw) {
            Ok(entries) => entries,
            Err(e) => {
                let e = StorageError::from(e);
                warn!(error = %e, "search cache corrupt, treating as empty");
                Vec::new()
            }
        }
    }

    /// Exact, case-insensitive lookup. Expired entries read as absent but
    /// are left in place for the next write or sweep.
    pub fn get_exact(&self, query: &str) -> Option<Vec<SearchResult>> {
        let now = self.clock.now_millis();
        let hit = self
            .load()
            .into_iter()
            .find(|e| same_query(&e.query, query) && self.is_live(e, now))
            .map(|e| e.results);

        debug!(query, hit = hit.is_some(), "exact cache lookup");
        hit
    }

    /// Substring scan across every live entry's results.
    ///
    /// Matches are merged in entry order, deduplicated by provider id,
    /// prefix matches are moved first, and the list is cut to the display
    /// limit. `None` when nothing matches.
    pub fn search_partial(&self, fragment: &str) -> Option<Vec<SearchResult>> {
        let folded = fold_key(fragment);
        if folded.is_empty() {
            return None;
        }

        let now = self.clock.now_millis();
        let matches: Vec<SearchResult> = self
            .load()
            .into_iter()
            .filter(|e| self.is_live(e, now))
            .flat_map(|e| e.results)
            .filter(|r| r.name_contains_folded(&folded))
            .collect();

        if matches.is_empty() {
            debug!(fragment, "partial cache lookup: no match");
            return None;
        }

        let mut ranked = rank_by_relevance(dedupe_by_id(matches), &folded);
        ranked.truncate(self.max_display);
        debug!(fragment, count = ranked.len(), "partial cache lookup");
        Some(ranked)
    }

    /// Records `results` for `query`, replacing any entry for the same
    /// query and evicting the oldest entries past the bound.
    pub fn put(&mut self, query: &str, results: Vec<SearchResult>) {
        let now = self.clock.now_millis();
        let mut entries = self.load();

        entries.retain(|e| self.is_live(e, now) && !same_query(&e.query, query));
        entries.push(CacheEntry {
            query: query.to_owned(),
            results,
            timestamp: now,
        });

        let overflow = entries.len().saturating_sub(self.config.max_entries);
        if overflow > 0 {
            debug!(evicted = overflow, "search cache full, evicting oldest");
            entries.drain(..overflow);
        }

        self.persist(&entries);
    }

    /// Drops every expired entry. Returns how many were removed.
    pub fn sweep(&mut self) -> usize {
        let now = self.clock.now_millis();
        let mut entries = self.load();
        let before = entries.len();
        entries.retain(|e| self.is_live(e, now));

        let removed = before - entries.len();
        if removed > 0 {
            debug!(removed, "swept expired search cache entries");
            self.persist(&entries);
        }
        removed
    }

    /// Forgets everything.
    pub fn clear(&mut self) {
        if let Err(e) = self.store.remove(&self.config.storage_key) {
            warn!(error = %e, "could not clear search cache");
        }
    }

    pub fn stats(&self) -> CacheStats {
        let now = self.clock.now_millis();
        let entries = self.load();
        CacheStats {
            entries: entries.len(),
            results: entries.iter().map(|e| e.results.len()).sum(),
            expired: entries.iter().filter(|e| !self.is_live(e, now)).count(),
        }
    }

    fn ttl_millis(&self) -> i64 {
        i64::try_from(self.config.ttl().as_millis()).unwrap_or(i64::MAX)
    }

    fn is_live(&self, entry: &CacheEntry, now: i64) -> bool {
        now.saturating_sub(entry.timestamp) <= self.ttl_millis()
    }

    fn persist(&mut self, entries: &[CacheEntry]) {
        let json = match serde_json::to_string(entries) {
            Ok(json) => json,
            Err(e) => {
                warn!(error = %e, "could not encode search cache");
                return;
            }
        };
        if let Err(e) = self.store.write(&self.config.storage_key, &json) {
            warn!(error = %e, "could not persist search cache");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ManualClock;
    use crate::model::{LatLon, PlaceId};
    use std::time::Duration;

    const START: i64 = 1_700_000_000_000;

    fn place(name: &str, id: i64) -> SearchResult {
        SearchResult::new(name, LatLon::new(-25.4, -49.2)).with_id(PlaceId::Num(id))
    }

    fn cache_with(store: MemoryStore, max_entries: usize) -> (ResultCache<MemoryStore>, Rc<ManualClock>) {
        let clock = Rc::new(ManualClock::new(START));
        let config = CacheConfig {
            max_entries,
            ..CacheConfig::default()
        };
        let cache = ResultCache::with_clock(store, config, 8, clock.clone());
        (cache, clock)
    }

    fn cache(max_entries: usize) -> (ResultCache<MemoryStore>, Rc<ManualClock>) {
        cache_with(MemoryStore::new(), max_entries)
    }

    #[test]
    fn exact_round_trip_before_ttl() {
        let (mut cache, clock) = cache(10);
        let results = vec![place("Curitiba", 1)];
        cache.put("Curitiba", results.clone());

        clock.advance(Duration::from_secs(60));
        assert_eq!(cache.get_exact("Curitiba"), Some(results.clone()));
        assert_eq!(cache.get_exact("CURITIBA"), Some(results));
        assert_eq!(cache.get_exact("Curitiba, PR"), None);
    }

    #[test]
    fn exact_is_absent_after_ttl_but_not_deleted() {
        let (mut cache, clock) = cache(10);
        cache.put("Curitiba", vec![place("Curitiba", 1)]);

        clock.advance(cache.config().ttl() + Duration::from_millis(1));
        assert_eq!(cache.get_exact("Curitiba"), None);
        assert_eq!(cache.load().len(), 1);
    }

    #[test]
    fn put_replaces_same_query_case_insensitively() {
        let (mut cache, _clock) = cache(10);
        cache.put("curitiba", vec![place("Old", 1)]);
        cache.put("Curitiba", vec![place("New", 2)]);

        let entries = cache.load();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].query, "Curitiba");
        assert_eq!(entries[0].results[0].name, "New");
    }

    #[test]
    fn evicts_oldest_inserted_first() {
        let (mut cache, clock) = cache(3);
        for (i, q) in ["a", "b", "c", "d"].iter().enumerate() {
            cache.put(q, vec![place(q, i as i64)]);
            clock.advance(Duration::from_secs(1));
        }

        let queries: Vec<_> = cache.load().into_iter().map(|e| e.query).collect();
        assert_eq!(queries, ["b", "c", "d"]);
        assert_eq!(cache.get_exact("a"), None);
    }

    #[test]
    fn lookup_does_not_refresh_position() {
        let (mut cache, _clock) = cache(2);
        cache.put("a", vec![place("A", 1)]);
        cache.put("b", vec![place("B", 2)]);
        assert!(cache.get_exact("a").is_some());
        cache.put("c", vec![place("C", 3)]);

        assert_eq!(cache.get_exact("a"), None);
        assert!(cache.get_exact("b").is_some());
    }

    #[test]
    fn put_purges_expired_entries() {
        let (mut cache, clock) = cache(10);
        cache.put("old", vec![place("Old", 1)]);
        clock.advance(cache.config().ttl() + Duration::from_secs(1));
        cache.put("new", vec![place("New", 2)]);

        let queries: Vec<_> = cache.load().into_iter().map(|e| e.query).collect();
        assert_eq!(queries, ["new"]);
    }

    #[test]
    fn sweep_removes_only_expired() {
        let (mut cache, clock) = cache(10);
        cache.put("old", vec![place("Old", 1)]);
        clock.advance(Duration::from_secs(23 * 60 * 60));
        cache.put("fresh", vec![place("Fresh", 2)]);
        clock.advance(Duration::from_secs(2 * 60 * 60));

        assert_eq!(cache.stats().expired, 1);
        assert_eq!(cache.sweep(), 1);
        assert_eq!(cache.sweep(), 0);
        let queries: Vec<_> = cache.load().into_iter().map(|e| e.query).collect();
        assert_eq!(queries, ["fresh"]);
    }

    #[test]
    fn partial_matches_across_entries_ranked_and_deduped() {
        let (mut cache, _clock) = cache(10);
        cache.put("osasco", vec![place("Osasco", 1), place("Santo André", 2)]);
        cache.put("santos", vec![place("Santos", 3), place("Santo André", 2)]);

        let hits = cache.search_partial("SA").unwrap();
        let names: Vec<_> = hits.iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Santo André", "Santos", "Osasco"]);
    }

    #[test]
    fn partial_is_accent_insensitive_and_truncated() {
        let (mut cache, _clock) = cache(10);
        let many: Vec<_> = (0..20).map(|i| place(&format!("São Bento {i}"), i)).collect();
        cache.put("sao bento", many);

        let hits = cache.search_partial("sao be").unwrap();
        assert_eq!(hits.len(), 8);
        assert!(cache.search_partial("zzz").is_none());
        assert!(cache.search_partial("").is_none());
    }

    #[test]
    fn partial_skips_expired_entries() {
        let (mut cache, clock) = cache(10);
        cache.put("curitiba", vec![place("Curitiba", 1)]);
        clock.advance(cache.config().ttl() + Duration::from_secs(1));
        assert!(cache.search_partial("cur").is_none());
    }

    #[test]
    fn corrupt_storage_reads_as_empty_and_is_overwritten() {
        let mut store = MemoryStore::new();
        store.insert_raw(CacheConfig::default().storage_key, "{not json");
        let (mut cache, _clock) = cache_with(store, 10);

        assert!(cache.load().is_empty());
        assert_eq!(cache.get_exact("x"), None);
        cache.put("x", vec![place("X", 1)]);
        assert!(cache.get_exact("x").is_some());
    }

    #[test]
    fn quota_failure_is_swallowed() {
        let (mut cache, _clock) = cache_with(MemoryStore::with_quota(16), 10);
        cache.put("Curitiba", vec![place("Curitiba", 1)]);
        assert_eq!(cache.get_exact("Curitiba"), None);
        assert_eq!(cache.stats(), CacheStats::default());
    }

    #[test]
    fn clear_drops_the_key() {
        let (mut cache, _clock) = cache(10);
        cache.put("a", vec![place("A", 1)]);
        cache.clear();
        assert!(cache.load().is_empty());
        assert!(cache.store().get(&cache.config().storage_key).is_none());
    }
}
