use clap::{Args, Parser, Subcommand};
use geosearch_core::LatLon;
use std::path::PathBuf;

/// CLI arguments for geosearch
#[derive(Debug, Parser)]
#[command(
    name = "geosearch",
    version,
    about = "Search places through the geosearch-core cache and geocoding provider"
)]
pub struct CliArgs {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// JSON file with a SearchConfig; flags below override its fields
    #[arg(short = 'c', long = "config", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the persisted result cache (default: platform cache dir)
    #[arg(long = "cache-dir", global = true)]
    pub cache_dir: Option<PathBuf>,

    /// Preferred result language (e.g. pt-BR, en)
    #[arg(long = "lang", global = true, conflicts_with = "no_lang")]
    pub lang: Option<String>,

    /// Send no language and let the provider pick
    #[arg(long = "no-lang", global = true)]
    pub no_lang: bool,

    /// Geocoding endpoint URL
    #[arg(long = "endpoint", global = true)]
    pub endpoint: Option<String>,

    /// Number of results requested from the provider
    #[arg(long = "limit", global = true)]
    pub limit: Option<usize>,

    /// Map center used to bias results, as LAT,LON (e.g. -25.43,-49.27)
    #[arg(long = "center", global = true, value_parser = parse_center, allow_hyphen_values = true)]
    pub center: Option<LatLon>,

    /// Log at debug level (otherwise RUST_LOG, default warn)
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Resolve a query from the cache or the provider
    Search {
        /// Free-text place query
        query: String,

        /// Print results as JSON
        #[arg(long)]
        json: bool,

        /// Select the Nth result (1-based) and show where the map would go
        #[arg(long)]
        pick: Option<usize>,
    },

    /// Show what the cache alone suggests for a fragment (never hits the network)
    Suggest {
        /// Partial text, matched ignoring case and accents
        fragment: String,
    },

    /// Inspect or maintain the persisted result cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Type queries line by line, as in a search box
    Interactive,
}

#[derive(Debug, Clone, Copy, Subcommand)]
pub enum CacheAction {
    /// Show entry and result counts
    Stats,
    /// List cached queries, oldest first
    List,
    /// Delete every entry
    Clear,
    /// Delete expired entries
    Sweep,
}

/// Parses `LAT,LON` into a finite coordinate.
pub fn parse_center(s: &str) -> Result<LatLon, String> {
    let (lat, lon) = s
        .split_once(',')
        .ok_or_else(|| format!("expected LAT,LON, got `{s}`"))?;
    let lat: f64 = lat
        .trim()
        .parse()
        .map_err(|e| format!("invalid latitude `{}`: {e}", lat.trim()))?;
    let lon: f64 = lon
        .trim()
        .parse()
        .map_err(|e| format!("invalid longitude `{}`: {e}", lon.trim()))?;

    let center = LatLon::new(lat, lon);
    if !center.is_finite() {
        return Err(format!("coordinates must be finite, got `{s}`"));
    }
    Ok(center)
}
