// crates/geosearch-core/src/text.rs

//! # Text folding
//!
//! Every comparison the search subsystem makes between a user fragment and
//! a place name (partial cache matching, duplicate detection, relevance
//! ranking) goes through [`normalize`]. Callers must not substitute their
//! own `to_lowercase` or the three paths stop agreeing on what "the same
//! name" means.

use unicode_normalization::UnicodeNormalization;

/// The "Combining Diacritical Marks" block.
const COMBINING_MARKS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036F}';

/// Convert an optional display string into a comparison key.
///
/// This performs:
/// 1) Lowercasing
/// 2) Canonical decomposition (NFD), so `ã` becomes `a` + U+0303
/// 3) Removal of combining diacritical marks
///
/// Absent input folds to the empty string.
///
/// # Examples
///
/// ```rust
/// use geosearch_core::text::normalize;
///
/// assert_eq!(normalize(Some("São Paulo")), "sao paulo");
/// assert_eq!(normalize(Some("CURITIBA")), "curitiba");
/// assert_eq!(normalize(None), "");
/// ```
pub fn normalize(s: Option<&str>) -> String {
    match s {
        Some(s) => fold_key(s),
        None => String::new(),
    }
}

/// [`normalize`] for a string that is known to be present.
///
/// ```rust
/// use geosearch_core::text::fold_key;
///
/// assert_eq!(fold_key("Florianópolis"), "florianopolis");
/// assert_eq!(fold_key("Ñandú"), fold_key("nandu"));
/// ```
pub fn fold_key(s: &str) -> String {
    s.to_lowercase()
        .nfd()
        .filter(|c| !COMBINING_MARKS.contains(c))
        .collect()
}
