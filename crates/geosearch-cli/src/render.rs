//! Plain-text rendering of results, outcomes and cache contents.

use chrono::DateTime;
use geosearch_core::viewport::ViewportMove;
use geosearch_core::{CacheEntry, CacheStats, SearchOutcome, SearchResult};
use std::time::Duration;

/// `N. label  (lat, lon)`, 1-based.
pub fn result_line(index: usize, result: &SearchResult) -> String {
    format!(
        "{:>2}. {}  ({:.5}, {:.5})",
        index + 1,
        result.label(),
        result.position.lat,
        result.position.lon
    )
}

pub fn result_lines(results: &[SearchResult]) -> Vec<String> {
    results
        .iter()
        .enumerate()
        .map(|(i, r)| result_line(i, r))
        .collect()
}

pub fn outcome_line(outcome: &SearchOutcome) -> String {
    match outcome {
        SearchOutcome::Skipped(reason) => format!("skipped ({reason:?})"),
        SearchOutcome::CacheHit { count } => format!("{count} result(s) from cache"),
        SearchOutcome::Network { count } => format!("{count} result(s) from provider"),
        SearchOutcome::Empty => "no results".to_string(),
        SearchOutcome::Failed(e) => format!("no results (provider unavailable: {e})"),
    }
}

pub fn viewport_move_line(m: &ViewportMove) -> String {
    match m {
        ViewportMove::PanTo { center, zoom } => {
            format!("map: pan to ({:.5}, {:.5}) at zoom {zoom}", center.lat, center.lon)
        }
        ViewportMove::FitBounds { extent, options } => {
            let sw = extent.south_west();
            let ne = extent.north_east();
            format!(
                "map: fit ({:.5}, {:.5})-({:.5}, {:.5}), padding {}px, max zoom {}",
                sw.lat, sw.lon, ne.lat, ne.lon, options.padding, options.max_zoom
            )
        }
    }
}

/// One cache entry: timestamp, query, result count, and whether it is past `ttl`.
pub fn entry_line(entry: &CacheEntry, now_millis: i64, ttl: Duration) -> String {
    let when = DateTime::from_timestamp_millis(entry.timestamp)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| entry.timestamp.to_string());
    let ttl_millis = i64::try_from(ttl.as_millis()).unwrap_or(i64::MAX);
    let expired = now_millis.saturating_sub(entry.timestamp) > ttl_millis;

    format!(
        "{when}  {:?}  {} result(s){}",
        entry.query,
        entry.results.len(),
        if expired { "  [expired]" } else { "" }
    )
}

pub fn stats_lines(stats: &CacheStats) -> Vec<String> {
    vec![
        "Cache statistics:".to_string(),
        format!("  Queries: {}", stats.entries),
        format!("  Results: {}", stats.results),
        format!("  Expired: {}", stats.expired),
    ]
}
