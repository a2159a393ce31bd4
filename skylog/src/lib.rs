//! skylog - GPS telemetry to logbook flight records
//!
//! This library converts a raw, irregularly-sampled stream of GPS
//! telemetry into discrete, airport-anchored flight records suitable for
//! an aviation logbook: it detects where flight begins and ends inside a
//! continuous position stream, computes derived kinematic fields, matches
//! endpoints to known airports, and avoids duplicate storage of the same
//! flight.
//!
//! # High-Level API
//!
//! ```
//! use skylog::ingest::{IngestConfig, IngestService, MemoryAirportDirectory, MemoryFlightStore};
//! use skylog::position::parse_batch;
//!
//! let service = IngestService::new(
//!     MemoryAirportDirectory::new(Vec::new()),
//!     MemoryFlightStore::new(),
//!     IngestConfig::default(),
//! );
//!
//! let samples = parse_batch(
//!     r#"[{ "time": 1700000000, "latitude": 53.63, "longitude": 9.98, "altitude": 16.0 },
//!         { "time": 1700000060, "latitude": 53.64, "longitude": 9.99, "altitude": 450.0 }]"#,
//! )?;
//! let report = service.ingest(samples)?;
//! assert!(report.created.is_empty()); // one slow hop, no flight detected
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod airport;
pub mod config;
pub mod flight;
pub mod geo;
pub mod ingest;
pub mod logging;
pub mod position;
pub mod segmenter;

/// Version of the skylog library and CLI.
///
/// This is synchronized across all components in the workspace.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
