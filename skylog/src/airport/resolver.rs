//! Nearest-airport matching.
//!
//! A linear scan over both candidate pools in a fixed order: previously
//! visited airports first, then the reference directory. The scan keeps
//! the strict minimum, so a tie resolves in favor of the
//! earliest-encountered candidate. This is deterministic because the
//! iteration order is fixed, not a distance tie-break policy.
//!
//! The O(candidates × airports) cost is fine at the directory sizes seen
//! in practice; a spatial index only becomes worthwhile if the reference
//! pool grows by orders of magnitude.

use crate::geo::distance_km;

use super::AirportCandidate;

/// Find the airport closest to a position across both pools.
///
/// Returns `None` only when both pools are empty. The resolver has no
/// side effects; callers must `ensure_airport` a matched id in the
/// authoritative directory before persisting a reference to it.
pub fn nearest_airport<'a>(
    latitude: f64,
    longitude: f64,
    visited: &'a [AirportCandidate],
    reference: &'a [AirportCandidate],
) -> Option<&'a AirportCandidate> {
    let mut best: Option<(&AirportCandidate, f64)> = None;

    for candidate in visited.iter().chain(reference.iter()) {
        let dist = distance_km(latitude, longitude, candidate.latitude, candidate.longitude);
        match best {
            Some((_, best_dist)) if dist >= best_dist => {}
            _ => best = Some((candidate, dist)),
        }
    }

    best.map(|(candidate, _)| candidate)
}
