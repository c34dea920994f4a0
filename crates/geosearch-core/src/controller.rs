// crates/geosearch-core/src/controller.rs

//! # Search Controller
//!
//! Owns one search session: the text in the box, whether a request is in
//! flight, and the list currently shown. It decides per query whether the
//! answer comes from the partial cache scan, the exact cache, or the
//! provider, and tells subscribers about every state change.
//!
//! ```text
//!  set_query ──► partial cache scan ──► provisional results
//!  search    ──► exact cache ──hit──► results
//!                     │miss
//!                     └──► provider (+ viewport bias) ──► dedupe ──► results + cache write
//!  select_result ──► map viewport (no cache, no network)
//! ```

use crate::cache::{KeyValueStore, ResultCache};
use crate::config::SearchConfig;
use crate::dedup::dedupe;
use crate::error::NetworkError;
use crate::model::SearchResult;
use crate::remote::{GeocodeTransport, RemoteSearchClient};
use crate::viewport::MapViewport;
use tracing::{debug, info, warn};

/// Transient UI state of one search box. Never persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchSession {
    pub query: String,
    pub focused: bool,
    pub loading: bool,
    /// A `search()` finished for the current text.
    pub has_searched: bool,
    /// Text of the last query that `search()` resolved (or that a selection
    /// filled in).
    pub last_query: Option<String>,
    /// The current text was put there by picking a result.
    pub from_selection: bool,
    pub results: Vec<SearchResult>,
}

/// What changed, passed to subscribers with the new session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionChange {
    Query,
    Focus,
    Loading,
    /// `provisional` results come from the partial cache scan and may be
    /// replaced by a following `search()`.
    Results { provisional: bool },
    Selected,
    Cleared,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    BlankQuery,
    AlreadyResolved,
    FromSelection,
}

/// How a `search()` call was resolved.
///
/// The session state is the same for `Empty` and `Failed`; the outcome
/// lets a caller that cares tell "nothing found" from "provider down".
#[derive(Debug, Clone, PartialEq)]
pub enum SearchOutcome {
    Skipped(SkipReason),
    CacheHit { count: usize },
    Network { count: usize },
    Empty,
    Failed(NetworkError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

type Listener = Box<dyn FnMut(SessionChange, &SearchSession)>;

pub struct SearchController<T, S, M>
where
    T: GeocodeTransport,
    S: KeyValueStore,
    M: MapViewport,
{
    client: RemoteSearchClient<T>,
    cache: ResultCache<S>,
    map: M,
    config: SearchConfig,
    session: SearchSession,
    listeners: Vec<(SubscriptionId, Listener)>,
    next_subscription: u64,
}

impl<T, S, M> SearchController<T, S, M>
where
    T: GeocodeTransport,
    S: KeyValueStore,
    M: MapViewport,
{
    /// Starts a session. Expired cache entries are swept here.
    pub fn new(
        client: RemoteSearchClient<T>,
        mut cache: ResultCache<S>,
        map: M,
        config: SearchConfig,
    ) -> Self {
        cache.sweep();
        Self {
            client,
            cache,
            map,
            config,
            session: SearchSession::default(),
            listeners: Vec::new(),
            next_subscription: 0,
        }
    }

    pub fn session(&self) -> &SearchSession {
        &self.session
    }

    pub fn results(&self) -> &[SearchResult] {
        &self.session.results
    }

    pub fn query(&self) -> &str {
        &self.session.query
    }

    pub fn is_loading(&self) -> bool {
        self.session.loading
    }

    pub fn config(&self) -> &SearchConfig {
        &self.config
    }

    pub fn cache(&self) -> &ResultCache<S> {
        &self.cache
    }

    pub fn cache_mut(&mut self) -> &mut ResultCache<S> {
        &mut self.cache
    }

    pub fn client(&self) -> &RemoteSearchClient<T> {
        &self.client
    }

    pub fn map(&self) -> &M {
        &self.map
    }

    pub fn map_mut(&mut self) -> &mut M {
        &mut self.map
    }

    /// Registers `listener` for every subsequent state change.
    pub fn subscribe(
        &mut self,
        listener: impl FnMut(SessionChange, &SearchSession) + 'static,
    ) -> SubscriptionId {
        let id = SubscriptionId(self.next_subscription);
        self.next_subscription += 1;
        self.listeners.push((id, Box::new(listener)));
        id
    }

    /// Returns `false` if `id` was not subscribed.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|(sid, _)| *sid != id);
        self.listeners.len() != before
    }

    /// Updates the text and, for long enough text, shows whatever the cache
    /// already knows, which may be nothing. Never touches the network.
    pub fn set_query(&mut self, text: impl Into<String>) {
        self.session.query = text.into();
        self.session.from_selection = false;
        self.session.has_searched = false;
        self.notify(SessionChange::Query);

        if self.session.query.chars().count() >= self.config.min_query_len {
            let hits = self
                .cache
                .search_partial(&self.session.query)
                .unwrap_or_default();
            self.publish(hits, true);
        } else if !self.session.results.is_empty() {
            self.publish(Vec::new(), false);
        }
    }

    pub fn set_focused(&mut self, focused: bool) {
        if self.session.focused != focused {
            self.session.focused = focused;
            self.notify(SessionChange::Focus);
        }
    }

    /// Resolves the current query from the exact cache or the provider.
    ///
    /// Skipped for blank text, for text that came from picking a result, and
    /// for text already resolved. Whatever happens, the session ends up
    /// not loading, marked as searched, with this query recorded.
    pub async fn search(&mut self) -> SearchOutcome {
        if let Some(reason) = self.skip_reason() {
            debug!(query = %self.session.query, ?reason, "search skipped");
            return SearchOutcome::Skipped(reason);
        }

        let query = self.session.query.clone();
        self.session.loading = true;
        self.notify(SessionChange::Loading);

        let outcome = self.resolve(&query).await;

        self.session.loading = false;
        self.session.has_searched = true;
        self.session.last_query = Some(query);
        self.notify(SessionChange::Loading);
        outcome
    }

    /// Fills the box with the picked result and hands it to the map.
    pub fn select_result(&mut self, result: &SearchResult) {
        self.session.query = result.name.clone();
        self.session.last_query = Some(result.name.clone());
        self.session.from_selection = true;
        self.session.results.clear();
        self.session.focused = false;

        self.map.on_result_selected(result);
        info!(name = %result.name, "search result selected");
        self.notify(SessionChange::Selected);
    }

    /// [`select_result`](Self::select_result) by position in the current list.
    pub fn select_index(&mut self, index: usize) -> Option<SearchResult> {
        let result = self.session.results.get(index)?.clone();
        self.select_result(&result);
        Some(result)
    }

    /// Back to an empty session.
    pub fn clear(&mut self) {
        self.session = SearchSession::default();
        self.notify(SessionChange::Cleared);
    }

    fn skip_reason(&self) -> Option<SkipReason> {
        let s = &self.session;
        if s.query.trim().is_empty() {
            Some(SkipReason::BlankQuery)
        } else if s.from_selection {
            Some(SkipReason::FromSelection)
        } else if s.last_query.as_deref() == Some(s.query.as_str()) {
            Some(SkipReason::AlreadyResolved)
        } else {
            None
        }
    }

    async fn resolve(&mut self, query: &str) -> SearchOutcome {
        if let Some(hits) = self.cache.get_exact(query) {
            let count = hits.len();
            self.publish(hits, false);
            return SearchOutcome::CacheHit { count };
        }

        let bias = self.map.viewport_center();
        match self.client.try_fetch(query, bias).await {
            Ok(raw) => {
                let mut results = dedupe(raw);
                results.truncate(self.config.max_display);
                if results.is_empty() {
                    self.publish(Vec::new(), false);
                    return SearchOutcome::Empty;
                }

                let count = results.len();
                self.cache.put(query, results.clone());
                self.publish(results, false);
                SearchOutcome::Network { count }
            }
            Err(e) => {
                warn!(error = %e, query, "search failed, showing no results");
                self.publish(Vec::new(), false);
                SearchOutcome::Failed(e)
            }
        }
    }

    fn publish(&mut self, mut results: Vec<SearchResult>, provisional: bool) {
        results.truncate(self.config.max_display);
        self.session.results = results;
        self.notify(SessionChange::Results { provisional });
    }

    fn notify(&mut self, change: SessionChange) {
        for (_, listener) in self.listeners.iter_mut() {
            listener(change, &self.session);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::MemoryStore;
    use crate::model::LatLon;
    use crate::remote::{GeocodeRequest, TransportResponse};
    use crate::viewport::RecordingViewport;
    use async_trait::async_trait;
    use std::cell::RefCell;
    use std::rc::Rc;

    struct Offline;

    #[async_trait(?Send)]
    impl GeocodeTransport for Offline {
        async fn get(&self, _: &GeocodeRequest) -> Result<TransportResponse, NetworkError> {
            Err(NetworkError::Transport {
                message: "offline".into(),
            })
        }
    }

    fn controller() -> SearchController<Offline, MemoryStore, RecordingViewport> {
        let config = SearchConfig::default();
        let cache = ResultCache::new(MemoryStore::new(), config.cache.clone(), config.max_display);
        let client = RemoteSearchClient::new(Offline, &config.provider);
        SearchController::new(client, cache, RecordingViewport::default(), config)
    }

    #[test]
    fn short_query_clears_results() {
        let mut c = controller();
        c.cache_mut().put(
            "curitiba",
            vec![SearchResult::new("Curitiba", LatLon::new(-25.4, -49.2))],
        );

        c.set_query("cur");
        assert_eq!(c.results().len(), 1);
        c.set_query("cu");
        assert!(c.results().is_empty());
    }

    #[test]
    fn listeners_see_changes_until_unsubscribed() {
        let mut c = controller();
        let seen: Rc<RefCell<Vec<SessionChange>>> = Rc::default();
        let sink = seen.clone();
        let id = c.subscribe(move |change, _| sink.borrow_mut().push(change));

        c.set_focused(true);
        c.set_focused(true);
        c.set_query("ab");
        assert_eq!(*seen.borrow(), [SessionChange::Focus, SessionChange::Query]);

        assert!(c.unsubscribe(id));
        assert!(!c.unsubscribe(id));
        c.clear();
        assert_eq!(seen.borrow().len(), 2);
    }

    #[tokio::test]
    async fn blank_query_is_skipped() {
        let mut c = controller();
        c.set_query("   ");
        assert_eq!(c.search().await, SearchOutcome::Skipped(SkipReason::BlankQuery));
        assert!(!c.session().has_searched);
    }

    #[tokio::test]
    async fn failure_finalizes_session() {
        let mut c = controller();
        c.set_query("Curitiba");
        let outcome = c.search().await;

        assert!(matches!(outcome, SearchOutcome::Failed(NetworkError::Transport { .. })));
        let s = c.session();
        assert!(!s.loading);
        assert!(s.has_searched);
        assert_eq!(s.last_query.as_deref(), Some("Curitiba"));
        assert!(s.results.is_empty());
        assert!(c.cache().load().is_empty());

        assert_eq!(c.search().await, SearchOutcome::Skipped(SkipReason::AlreadyResolved));
    }

    #[test]
    fn unmatched_query_drops_previous_suggestions() {
        let mut c = controller();
        c.cache_mut().put(
            "curitiba",
            vec![SearchResult::new("Curitiba", LatLon::new(-25.4, -49.2))],
        );

        c.set_query("cur");
        assert_eq!(c.results().len(), 1);
        c.set_query("Londrina");
        assert!(c.results().is_empty());
    }

    #[tokio::test]
    async fn selected_text_is_not_searched() {
        let mut c = controller();
        let picked = SearchResult::new("Curitiba", LatLon::new(-25.4, -49.2));
        c.select_result(&picked);

        assert_eq!(c.search().await, SearchOutcome::Skipped(SkipReason::FromSelection));
        assert!(!c.session().has_searched);

        c.set_query("Curitiba");
        assert_eq!(c.search().await, SearchOutcome::Skipped(SkipReason::AlreadyResolved));
    }

    #[test]
    fn clear_resets_everything() {
        let mut c = controller();
        c.set_focused(true);
        c.set_query("Curitiba");
        c.clear();
        assert_eq!(c.session(), &SearchSession::default());
    }
}
