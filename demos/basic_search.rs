//! Basic search example for geosearch-rs
//!
//! Resolves one query against the live Photon endpoint, twice: the second
//! call is answered from the cache without touching the network.

use geosearch_core::prelude::*;

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    println!("=== geosearch-rs Basic Search Example ===\n");

    let config = SearchConfig::default();
    let transport = HttpTransport::new(&config.provider)?;
    let client = RemoteSearchClient::new(transport, &config.provider);
    let cache = ResultCache::new(MemoryStore::new(), config.cache.clone(), config.max_display);
    let map = RecordingViewport::new(Some(LatLon::new(-25.4284, -49.2733)));
    let mut controller = SearchController::new(client, cache, map, config);

    println!("--- Example 1: First search goes to the provider ---");
    controller.set_query("Jardim Botânico");
    let outcome = controller.search().await;
    println!("{outcome:?}");
    for r in controller.results() {
        println!("- {r}");
    }
    println!();

    println!("--- Example 2: Same query again is a cache hit ---");
    controller.clear();
    controller.set_query("jardim botânico");
    println!("{:?}", controller.search().await);
    println!();

    println!("--- Example 3: Partial match while typing ---");
    controller.clear();
    controller.set_query("jard");
    for r in controller.results() {
        println!("- {r}");
    }

    Ok(())
}
