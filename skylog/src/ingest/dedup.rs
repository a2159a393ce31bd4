//! Duplicate flight detection.
//!
//! Independent GPS sessions recording the same physical flight start at
//! the same recorded time, so the orchestrator pre-filters stored flights
//! by exact start time (a cheap, nearly-always-correct first cut) and
//! this filter confirms identity on the remaining fields.

use crate::flight::CandidateFlight;

use super::traits::StoredFlightSummary;

/// Decide whether a candidate is already stored.
///
/// A stored flight is the same flight iff its resolved start airport,
/// resolved end airport, and position count all equal the candidate's.
/// `stored` must already be filtered to the candidate's exact start time.
pub fn is_duplicate(candidate: &CandidateFlight, stored: &[StoredFlightSummary]) -> bool {
    stored.iter().any(|existing| {
        existing.start_airport_id == candidate.start_airport_id
            && existing.end_airport_id == candidate.end_airport_id
            && existing.position_count == candidate.positions.len()
    })
}
