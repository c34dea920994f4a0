// crates/geosearch-core/src/dedup.rs

//! Duplicate collapsing and relevance ordering for result lists.

use crate::model::{PlaceId, SearchResult};
use crate::text::normalize;
use crate::traits::NameMatch;
use std::collections::HashSet;

/// Country display names rewritten to their local form.
const COUNTRY_CANONICAL: &[(&str, &str)] = &[("Brazil", "Brasil")];

/// Local display form of a country name. Exact, case-sensitive match.
pub fn canonical_country(country: &str) -> &str {
    COUNTRY_CANONICAL
        .iter()
        .find(|(from, _)| *from == country)
        .map(|(_, to)| *to)
        .unwrap_or(country)
}

/// Rewrites the country field of `result` in place.
pub(crate) fn canonicalize_country(result: &mut SearchResult) {
    if let Some(country) = result.country.as_deref() {
        let canonical = canonical_country(country);
        if canonical != country {
            result.country = Some(canonical.to_owned());
        }
    }
}

/// Semantic identity of a result that may lack a provider id.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
enum CompositeKey {
    /// Streets are identified by name and locality; the same street split
    /// into several OSM ways shows up once.
    Street { name: String, locality: String },
    Poi {
        name: String,
        locality: String,
        street: String,
    },
}

impl CompositeKey {
    /// `None` for name-less results, which are never merged.
    fn of(result: &SearchResult) -> Option<Self> {
        let name = result.name_key();
        if name.is_empty() {
            return None;
        }
        let locality = normalize(result.city.as_deref());

        Some(if result.is_thoroughfare() {
            CompositeKey::Street { name, locality }
        } else {
            CompositeKey::Poi {
                name,
                locality,
                street: normalize(result.street.as_deref()),
            }
        })
    }
}

/// Collapses a freshly fetched result list into a unique one.
///
/// A candidate is dropped when its provider id, or its composite key
/// (normalized name + locality, plus street for non-thoroughfares), was
/// already seen earlier in the list. Order is preserved, so the provider's
/// ranking decides which duplicate survives. Country names are
/// canonicalized on the way through.
pub fn dedupe(results: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut seen_ids: HashSet<PlaceId> = HashSet::new();
    let mut seen_keys: HashSet<CompositeKey> = HashSet::new();
    let mut out = Vec::with_capacity(results.len());

    for mut result in results {
        canonicalize_country(&mut result);

        if let Some(id) = &result.id {
            if seen_ids.contains(id) {
                continue;
            }
        }

        let key = CompositeKey::of(&result);
        if let Some(key) = &key {
            if seen_keys.contains(key) {
                continue;
            }
        }

        if let Some(id) = &result.id {
            seen_ids.insert(id.clone());
        }
        if let Some(key) = key {
            seen_keys.insert(key);
        }
        out.push(result);
    }
    out
}

/// Drops later results whose provider id was already seen. Results without
/// an id are all kept.
pub fn dedupe_by_id(results: Vec<SearchResult>) -> Vec<SearchResult> {
    let mut seen: HashSet<PlaceId> = HashSet::new();
    results
        .into_iter()
        .filter(|r| match &r.id {
            Some(id) => seen.insert(id.clone()),
            None => true,
        })
        .collect()
}

/// Moves results whose folded name starts with `folded_fragment` ahead of
/// the rest. Stable: ties keep their incoming order.
pub fn rank_by_relevance(mut results: Vec<SearchResult>, folded_fragment: &str) -> Vec<SearchResult> {
    results.sort_by_key(|r| !r.name_starts_with_folded(folded_fragment));
    results
}
