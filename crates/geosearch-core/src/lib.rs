// crates/geosearch-core/src/lib.rs

//! Client-side geocode search.
//!
//! A query typed into a search box is answered, in order of preference, by a
//! fuzzy scan of recently cached results, by an exact cache hit, or by the
//! remote geocoding provider. Provider results are deduplicated and cached
//! for the next time; a picked result moves the map.
//!
//! The entry point is [`SearchController`]; the pieces it is built from are
//! usable on their own.

pub mod cache;
pub mod clock;
pub mod common;
pub mod config;
pub mod controller;
pub mod dedup;
pub mod error;
pub mod model;
pub mod prelude;
pub mod remote;
pub mod text;
pub mod traits;
pub mod viewport;

// Re-exports
pub use crate::cache::{CacheEntry, FileStore, KeyValueStore, MemoryStore, ResultCache};
pub use crate::common::CacheStats;
pub use crate::config::{CacheConfig, ProviderConfig, SearchConfig};
pub use crate::controller::{
    SearchController, SearchOutcome, SearchSession, SessionChange, SkipReason, SubscriptionId,
};
pub use crate::error::{GeoSearchError, NetworkError, Result, StorageError};
pub use crate::model::{Extent, LatLon, PlaceId, PlaceType, SearchResult};
#[cfg(feature = "http")]
pub use crate::remote::http::HttpTransport;
pub use crate::remote::{GeocodeRequest, GeocodeTransport, RemoteSearchClient, TransportResponse};
pub use crate::text::{fold_key, normalize};
pub use crate::traits::NameMatch;
pub use crate::viewport::{MapViewport, RecordingViewport};
