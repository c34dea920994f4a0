//! Offline session example for geosearch-rs
//!
//! Drives a full search-box session against a canned provider response:
//! subscribing to changes, searching, a failing first attempt with the
//! language fallback, and picking a result to move the map.

use async_trait::async_trait;
use geosearch_core::prelude::*;
use geosearch_core::{GeocodeRequest, NetworkError, TransportResponse};
use std::cell::Cell;

const BODY: &str = r#"{"type":"FeatureCollection","features":[
  {"geometry":{"type":"Point","coordinates":[-49.2733,-25.4284]},
   "properties":{"osm_id":297514,"osm_key":"place","type":"city","name":"Curitiba",
                 "state":"Paraná","country":"Brazil","extent":[-49.3893,-25.645,-49.1851,-25.3451]}},
  {"geometry":{"type":"Point","coordinates":[-50.5847,-27.2828]},
   "properties":{"osm_id":296045,"osm_key":"place","type":"town","name":"Curitibanos",
                 "state":"Santa Catarina","country":"Brazil"}}
]}"#;

/// Rejects the first request (the one carrying `lang`), then answers.
#[derive(Default)]
struct FlakyProvider {
    calls: Cell<usize>,
}

#[async_trait(?Send)]
impl GeocodeTransport for FlakyProvider {
    async fn get(&self, request: &GeocodeRequest) -> std::result::Result<TransportResponse, NetworkError> {
        self.calls.set(self.calls.get() + 1);
        println!("  provider <- {:?}", request.query_pairs());
        if request.language.is_some() {
            return Ok(TransportResponse {
                status: 502,
                body: String::new(),
            });
        }
        Ok(TransportResponse::ok(BODY))
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    println!("=== geosearch-rs Offline Session Example ===\n");

    let config = SearchConfig::default();
    let client = RemoteSearchClient::new(FlakyProvider::default(), &config.provider);
    let cache = ResultCache::new(MemoryStore::new(), config.cache.clone(), config.max_display);
    let mut controller = SearchController::new(client, cache, RecordingViewport::default(), config);

    controller.subscribe(|change, session| {
        if let SessionChange::Results { provisional } = change {
            println!("  [{} result(s), provisional: {provisional}]", session.results.len());
        }
    });

    println!("--- Search with language fallback ---");
    controller.set_query("Curiti");
    let outcome = controller.search().await;
    println!("{outcome:?} after {} provider call(s)", controller.client().transport().calls.get());
    for r in controller.results() {
        println!("- {r} ({:?})", r.place_type());
    }
    println!();

    println!("--- Typing again: suggestions come from the cache ---");
    controller.clear();
    controller.set_query("curitibanos");
    for r in controller.results() {
        println!("- {r}");
    }
    println!();

    println!("--- Picking the city fits the map to its extent ---");
    controller.set_query("Curitiba");
    if let Some(city) = controller.results().first().cloned() {
        controller.select_result(&city);
    }
    println!("{:?}", controller.map().last_move());
    println!("search again: {:?}", controller.search().await);

    Ok(())
}
