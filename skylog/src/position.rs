//! Telemetry sample types.
//!
//! This module defines the two position representations the pipeline moves
//! between:
//!
//! - [`RawPosition`] - One GPS sample as submitted by the tracking device
//! - [`DerivedPosition`] - A sample enriched with kinematic data computed
//!   from its predecessor (groundspeed, heading, altitude trend)
//! - [`AltitudeChange`] - Altitude trend between consecutive samples
//!
//! Altitude is converted from meters to hundreds of feet exactly once, when
//! a [`DerivedPosition`] is built, and never reconverted afterwards.

use serde::{Deserialize, Serialize};

/// Conversion factor: meters to feet.
const METERS_TO_FEET: f64 = 3.28084;

/// One raw GPS sample from the tracking device.
///
/// Submitted as part of a JSON telemetry batch. Batches are not required
/// to be pre-sorted; the ingestion orchestrator sorts ascending by `time`
/// before processing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RawPosition {
    /// Sample time in epoch seconds.
    pub time: i64,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Altitude in meters.
    pub altitude: f64,
}

impl RawPosition {
    /// Altitude in hundreds of feet, floor-truncated.
    ///
    /// This is the only place the meters-to-feet conversion happens; all
    /// downstream altitude comparisons work on the truncated value.
    pub fn altitude_hundreds_ft(&self) -> i32 {
        (self.altitude * METERS_TO_FEET / 100.0).floor() as i32
    }
}

/// Altitude trend between two consecutive samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AltitudeChange {
    /// Altitude increased between samples.
    Climbing,
    /// Altitude decreased between samples.
    Descending,
    /// Altitude unchanged (same hundreds-of-feet value).
    Level,
    /// Trend could not be derived.
    #[default]
    Unknown,
}

impl std::fmt::Display for AltitudeChange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Climbing => write!(f, "Climbing"),
            Self::Descending => write!(f, "Descending"),
            Self::Level => write!(f, "Level"),
            Self::Unknown => write!(f, "Unknown"),
        }
    }
}

impl AltitudeChange {
    /// Derive the trend from two floor-truncated hundreds-of-feet values.
    pub fn between(prev_hundreds_ft: i32, next_hundreds_ft: i32) -> Self {
        match next_hundreds_ft.cmp(&prev_hundreds_ft) {
            std::cmp::Ordering::Greater => Self::Climbing,
            std::cmp::Ordering::Less => Self::Descending,
            std::cmp::Ordering::Equal => Self::Level,
        }
    }
}

/// One position with kinematic data derived from its predecessor.
///
/// Built by the segmenter from a pair of consecutive [`RawPosition`]s.
/// Timestamps within a flight's position sequence are strictly increasing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedPosition {
    /// Sample time in epoch seconds.
    pub timestamp: i64,
    /// Latitude in decimal degrees.
    pub latitude: f64,
    /// Longitude in decimal degrees.
    pub longitude: f64,
    /// Groundspeed in knots over the step from the previous sample.
    pub groundspeed_knots: f64,
    /// Altitude in hundreds of feet, floor-truncated.
    pub altitude_hundreds_ft: i32,
    /// True heading in degrees (0-360) over the step.
    pub heading: f64,
    /// Altitude trend over the step.
    pub altitude_change: AltitudeChange,
}

/// Parse a JSON telemetry batch into raw positions.
///
/// The input is a JSON array of `{ time, latitude, longitude, altitude }`
/// objects, in any order.
///
/// # Errors
///
/// Returns the underlying `serde_json` error for malformed input.
pub fn parse_batch(json: &str) -> Result<Vec<RawPosition>, serde_json::Error> {
    serde_json::from_str(json)
}
