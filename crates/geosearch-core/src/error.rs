// crates/geosearch-core/src/error.rs

//! Error types for the search subsystem.
//!
//! None of these reach the UI layer: the controller turns network failures
//! into empty result lists and the cache logs and swallows storage
//! failures. They exist so the lower layers can report *what* went wrong
//! to logs, tests and callers that opt into the fallible APIs.

use thiserror::Error;

/// Result alias for fallible, non-network operations (config, stores).
pub type Result<T> = std::result::Result<T, GeoSearchError>;

/// Umbrella error for the crate.
#[derive(Error, Debug)]
pub enum GeoSearchError {
    #[error("Network error: {0}")]
    Network(#[from] NetworkError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure talking to the geocoding provider.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum NetworkError {
    /// The request never produced a response (DNS, TLS, connection reset...).
    #[error("transport failure: {message}")]
    Transport { message: String },

    /// The provider answered with a non-2xx status.
    #[error("provider returned HTTP {status}")]
    Status { status: u16 },

    /// The provider answered 2xx but the body was not a feature collection.
    #[error("could not decode provider response: {message}")]
    Decode { message: String },
}

/// Failure reading or writing the persisted cache store.
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("store I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored value is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),

    #[error("store quota exceeded: {needed} bytes needed, {quota} allowed")]
    QuotaExceeded { needed: usize, quota: usize },

    #[error("store unavailable: {0}")]
    Unavailable(String),
}
