// crates/geosearch-core/src/prelude.rs
//! Everything needed to wire up a search box.
//!
//! ```
//! use geosearch_core::prelude::*;
//!
//! let config = SearchConfig::default();
//! let cache = ResultCache::new(MemoryStore::new(), config.cache.clone(), config.max_display);
//! assert!(cache.load().is_empty());
//! ```

pub use crate::cache::{FileStore, KeyValueStore, MemoryStore, ResultCache};
pub use crate::clock::{Clock, ManualClock, SystemClock};
pub use crate::config::SearchConfig;
pub use crate::controller::{SearchController, SearchOutcome, SessionChange};
pub use crate::error::{GeoSearchError, Result};
pub use crate::model::{LatLon, SearchResult};
#[cfg(feature = "http")]
pub use crate::remote::http::HttpTransport;
pub use crate::remote::{GeocodeTransport, RemoteSearchClient};
pub use crate::traits::NameMatch;
pub use crate::viewport::{MapViewport, RecordingViewport};
