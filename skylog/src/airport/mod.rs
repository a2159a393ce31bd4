//! Airport candidates and nearest-airport matching.
//!
//! Flight endpoints are anchored to airports by nearest-neighbor matching
//! against two candidate pools: airports the pilot has previously visited,
//! and a larger reference directory. The pools come from distinct
//! authoritative sources and are searched in that fixed order without
//! being merged or cross-deduplicated.
//!
//! # Example
//!
//! ```
//! use skylog::airport::{resolver::nearest_airport, AirportCandidate};
//!
//! let visited = vec![AirportCandidate::new("EDDH", 53.630278, 9.988333)];
//! let reference = vec![AirportCandidate::new("LFBO", 43.629444, 1.363889)];
//!
//! let found = nearest_airport(53.64, 9.99, &visited, &reference).unwrap();
//! assert_eq!(found.id, "EDDH");
//! ```

pub mod parser;
pub mod resolver;

pub use parser::{AirportFileError, AirportFileParser};
pub use resolver::nearest_airport;

use serde::{Deserialize, Serialize};

/// One airport considered during nearest-neighbor matching.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirportCandidate {
    /// ICAO-style identifier (e.g., "EDDH", "KJFK").
    pub id: String,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl AirportCandidate {
    /// Create a new candidate.
    pub fn new(id: &str, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.to_string(),
            latitude,
            longitude,
        }
    }
}

/// An authoritative airport record held by the airport directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AirportRecord {
    /// ICAO-style identifier.
    pub id: String,
    /// Airport name, when known.
    pub name: Option<String>,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
}

impl AirportRecord {
    /// Create a new record.
    pub fn new(id: &str, name: Option<&str>, latitude: f64, longitude: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.map(str::to_string),
            latitude,
            longitude,
        }
    }

    /// The record reduced to a matching candidate.
    pub fn as_candidate(&self) -> AirportCandidate {
        AirportCandidate {
            id: self.id.clone(),
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}
