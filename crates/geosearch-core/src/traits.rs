// crates/geosearch-core/src/traits.rs
use crate::model::SearchResult;
use crate::text::fold_key;

/// Name-based matching helpers for types that expose a display name.
///
/// This trait centralizes accent-insensitive and case-insensitive
/// comparisons based on [`fold_key`]. Implementors provide a `&str` view of
/// their display name via [`NameMatch::name_str`], and get:
/// - [`NameMatch::name_key`]: the folded name
/// - [`NameMatch::name_contains`]: substring match on folded form
/// - [`NameMatch::name_starts_with`]: prefix match on folded form
///
/// The `*_folded` variants take a fragment that is already folded, so a
/// scan over many candidates folds the query only once.
///
/// # Examples
/// ```rust
/// use geosearch_core::traits::NameMatch;
///
/// struct Place(&'static str);
/// impl NameMatch for Place {
///     fn name_str(&self) -> &str { self.0 }
/// }
///
/// assert!(Place("São José dos Pinhais").name_contains("jose"));
/// assert!(Place("Santos").name_starts_with("SA"));
/// ```
pub trait NameMatch {
    /// Returns the display name used for matching.
    fn name_str(&self) -> &str;

    #[inline]
    fn name_key(&self) -> String {
        fold_key(self.name_str())
    }

    #[inline]
    fn name_contains(&self, q: &str) -> bool {
        self.name_contains_folded(&fold_key(q))
    }

    #[inline]
    fn name_starts_with(&self, q: &str) -> bool {
        self.name_starts_with_folded(&fold_key(q))
    }

    #[inline]
    fn name_contains_folded(&self, folded: &str) -> bool {
        self.name_key().contains(folded)
    }

    #[inline]
    fn name_starts_with_folded(&self, folded: &str) -> bool {
        self.name_key().starts_with(folded)
    }
}

impl NameMatch for SearchResult {
    fn name_str(&self) -> &str {
        &self.name
    }
}
