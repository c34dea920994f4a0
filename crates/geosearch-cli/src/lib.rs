//! geosearch-cli
//! =============
//!
//! Command-line interface for the `geosearch-core` search subsystem.
//!
//! The binary (`geosearch`) drives the same `SearchController` a map UI
//! would: queries go through the persisted result cache first and reach the
//! geocoding provider only on a miss.
//!
//! Quick start
//! -----------
//!
//! ```text
//! geosearch --help
//! geosearch search "Curitiba"
//! geosearch --center -25.43,-49.27 search "Rua XV" --pick 1
//! geosearch suggest cur
//! geosearch cache stats
//! geosearch interactive
//! ```
//!
//! Logging goes to stderr. Set `RUST_LOG` (e.g. `RUST_LOG=geosearch_core=debug`)
//! or pass `--verbose`.
//!
//! For programmatic access, use the `geosearch-core` crate directly.
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod args;
pub mod render;
