//! Candidate flight records.
//!
//! A [`CandidateFlight`] is one contiguous in-flight run extracted from a
//! telemetry batch. It is not yet confirmed as new: the deduplication
//! filter decides whether it becomes a stored flight or is discarded.

use serde::{Deserialize, Serialize};

use crate::position::DerivedPosition;

/// A contiguous in-flight run extracted from a telemetry batch.
///
/// Created once per detected run and immutable afterwards, except for the
/// airport-id fields which the nearest-airport resolver fills in. Always
/// holds at least one [`DerivedPosition`]; empty runs never become
/// candidates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CandidateFlight {
    /// Derived positions in strictly increasing timestamp order.
    pub positions: Vec<DerivedPosition>,
    /// Timestamp of the first derived position (epoch seconds).
    pub start_time: i64,
    /// Timestamp of the last derived position (epoch seconds).
    pub end_time: i64,
    /// Latitude of the first derived position.
    pub start_latitude: f64,
    /// Longitude of the first derived position.
    pub start_longitude: f64,
    /// Latitude of the last derived position.
    pub end_latitude: f64,
    /// Longitude of the last derived position.
    pub end_longitude: f64,
    /// Cumulative great-circle distance flown, in kilometers.
    pub distance_km: f64,
    /// Resolved departure airport, if any.
    pub start_airport_id: Option<String>,
    /// Resolved arrival airport, if any.
    pub end_airport_id: Option<String>,
}

impl CandidateFlight {
    /// Build a candidate from an accumulated position run.
    ///
    /// Returns `None` for an empty run; a candidate always has at least
    /// one position.
    pub fn from_positions(positions: Vec<DerivedPosition>, distance_km: f64) -> Option<Self> {
        let first = positions.first()?;
        let last = positions.last()?;

        let (start_time, start_latitude, start_longitude) =
            (first.timestamp, first.latitude, first.longitude);
        let (end_time, end_latitude, end_longitude) = (last.timestamp, last.latitude, last.longitude);

        Some(Self {
            positions,
            start_time,
            end_time,
            start_latitude,
            start_longitude,
            end_latitude,
            end_longitude,
            distance_km,
            start_airport_id: None,
            end_airport_id: None,
        })
    }
}
