// crates/geosearch-core/src/config.rs

//! Tunables for the search subsystem.
//!
//! The constants are the shipped defaults. [`SearchConfig`] bundles them so a
//! session can be constructed with different values (tests, the CLI's
//! `--config` file) without any ambient global state.

use crate::error::{GeoSearchError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Minimum query length (in characters) that triggers a partial cache match.
pub const MIN_QUERY_LENGTH: usize = 3;
/// Maximum number of results published to the UI.
pub const MAX_DISPLAY_RESULTS: usize = 8;
/// Age after which a cache entry is treated as absent.
pub const CACHE_TTL: Duration = Duration::from_secs(24 * 60 * 60);
/// Maximum number of cached queries.
pub const CACHE_MAX_ENTRIES: usize = 50;
/// The single store key owned by the result cache.
pub const CACHE_STORAGE_KEY: &str = "geosearch.cache.v1";
/// Number of results requested from the provider.
pub const PROVIDER_LIMIT: usize = 10;
/// Preferred display language sent with every first attempt.
pub const DEFAULT_LANGUAGE: &str = "pt-BR";
/// Photon geocoding endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://photon.komoot.io/api/";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    pub min_query_len: usize,
    pub max_display: usize,
    pub cache: CacheConfig,
    pub provider: ProviderConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    pub ttl_secs: u64,
    pub max_entries: usize,
    pub storage_key: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProviderConfig {
    pub endpoint: String,
    pub limit: usize,
    /// `None` sends no `lang` parameter and therefore never retries.
    pub language: Option<String>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            min_query_len: MIN_QUERY_LENGTH,
            max_display: MAX_DISPLAY_RESULTS,
            cache: CacheConfig::default(),
            provider: ProviderConfig::default(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            ttl_secs: CACHE_TTL.as_secs(),
            max_entries: CACHE_MAX_ENTRIES,
            storage_key: CACHE_STORAGE_KEY.to_string(),
        }
    }
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            limit: PROVIDER_LIMIT,
            language: Some(DEFAULT_LANGUAGE.to_string()),
        }
    }
}

impl CacheConfig {
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }
}

impl SearchConfig {
    /// Reads a JSON config file. Missing fields take their defaults.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let config: SearchConfig = serde_json::from_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects values that would make the cache or display list useless.
    pub fn validate(&self) -> Result<()> {
        if self.max_display == 0 {
            return Err(GeoSearchError::Config("max_display must be > 0".into()));
        }
        if self.cache.max_entries == 0 {
            return Err(GeoSearchError::Config("cache.max_entries must be > 0".into()));
        }
        if self.provider.limit == 0 {
            return Err(GeoSearchError::Config("provider.limit must be > 0".into()));
        }
        if self.provider.endpoint.trim().is_empty() {
            return Err(GeoSearchError::Config("provider.endpoint is empty".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_match_constants() {
        let cfg = SearchConfig::default();
        assert_eq!(cfg.min_query_len, MIN_QUERY_LENGTH);
        assert_eq!(cfg.cache.ttl(), CACHE_TTL);
        assert_eq!(cfg.provider.language.as_deref(), Some(DEFAULT_LANGUAGE));
        cfg.validate().unwrap();
    }

    #[test]
    fn partial_file_keeps_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "max_display": 5, "cache": {{ "max_entries": 3 }} }}"#).unwrap();

        let cfg = SearchConfig::from_json_file(file.path()).unwrap();
        assert_eq!(cfg.max_display, 5);
        assert_eq!(cfg.cache.max_entries, 3);
        assert_eq!(cfg.cache.ttl_secs, CACHE_TTL.as_secs());
        assert_eq!(cfg.provider.limit, PROVIDER_LIMIT);
    }

    #[test]
    fn rejects_zero_limits() {
        let cfg = SearchConfig {
            max_display: 0,
            ..SearchConfig::default()
        };
        assert!(matches!(cfg.validate(), Err(GeoSearchError::Config(_))));
    }
}
