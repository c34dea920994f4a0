use serde::{Deserialize, Serialize};

/// Simple aggregate statistics for the result cache.
///
/// Returned by [`ResultCache::stats`](crate::cache::ResultCache::stats);
/// counts reflect what is currently persisted, including entries that are
/// past their TTL but not yet swept.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheStats {
    /// Stored queries, live or expired.
    pub entries: usize,
    /// Results across all stored queries.
    pub results: usize,
    /// Entries older than the TTL.
    pub expired: usize,
}
