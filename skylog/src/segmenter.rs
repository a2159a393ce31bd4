//! Flight/ground segmentation of a telemetry stream.
//!
//! The segmenter scans a time-sorted slice of raw positions with a
//! two-state machine (`Ground`, `Flight`) and extracts contiguous
//! in-flight runs as [`CandidateFlight`]s. One scan finds at most one run;
//! the orchestrator repeats scans from the returned resume index until the
//! stream is exhausted.
//!
//! # State machine
//!
//! Per consecutive sample pair, the step speed decides transitions:
//!
//! - `Ground` + speed above cutoff: switch to `Flight` for the *next*
//!   pair. The triggering sample itself is not appended, so the first
//!   position of every run corresponds to the second above-cutoff step.
//!   This one-sample entry lag matches the behavior observed on real
//!   device data and is relied upon by stored position counts; do not
//!   "fix" it without re-validating against device recordings.
//! - `Flight` + speed below cutoff: landing boundary. The below-cutoff
//!   sample is not appended and the scan stops there.
//! - Zero-distance pairs are stationary noise: skipped with no state
//!   transition and no emitted position.

use tracing::debug;

use crate::flight::CandidateFlight;
use crate::geo;
use crate::position::{AltitudeChange, DerivedPosition, RawPosition};

/// Default groundspeed cutoff separating ground and flight, in knots.
pub const DEFAULT_CUTOFF_KNOTS: f64 = 60.0;

/// Segmentation state, scoped to one scan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FlightState {
    /// Below the cutoff; searching for a takeoff.
    Ground,
    /// Above the cutoff; accumulating the current run.
    Flight,
}

/// Result of one segmentation scan.
#[derive(Debug)]
pub struct SegmentScan {
    /// The extracted run, if the scan accumulated any positions.
    pub candidate: Option<CandidateFlight>,
    /// Index to resume the next scan from: the landing-boundary sample,
    /// or the input length when the stream was exhausted.
    pub resume_index: usize,
}

/// Scan forward from `start_index` and extract the next in-flight run.
///
/// `samples` must already be sorted ascending by time; the orchestrator
/// guarantees this. Pairs with zero distance, or with no elapsed time
/// between them, carry no kinematic information and are skipped without
/// touching the state machine.
pub fn scan_from(samples: &[RawPosition], start_index: usize, cutoff_knots: f64) -> SegmentScan {
    let mut state = FlightState::Ground;
    let mut run: Vec<DerivedPosition> = Vec::new();
    let mut distance_km = 0.0;

    let mut index = start_index;
    while index + 1 < samples.len() {
        let prev = &samples[index];
        let next = &samples[index + 1];
        index += 1;

        let step_km = geo::distance_km(prev.latitude, prev.longitude, next.latitude, next.longitude);
        if step_km == 0.0 {
            continue;
        }

        let elapsed_secs = next.time - prev.time;
        if elapsed_secs <= 0 {
            // Duplicate timestamp after sorting; speed is undefined.
            continue;
        }

        let elapsed_hours = elapsed_secs as f64 / 3600.0;
        let speed_knots = step_km * geo::KM_TO_NM / elapsed_hours;

        match state {
            FlightState::Flight => {
                if speed_knots < cutoff_knots {
                    // Landing boundary. This sample stays on the ground side;
                    // the next scan resumes searching from it.
                    debug!(
                        index,
                        speed_knots, positions = run.len(), "Landing boundary detected"
                    );
                    return SegmentScan {
                        candidate: CandidateFlight::from_positions(run, distance_km),
                        resume_index: index,
                    };
                }

                run.push(derive_step(prev, next, speed_knots));
                distance_km += step_km;
            }
            FlightState::Ground => {
                if speed_knots > cutoff_knots {
                    // Takeoff: the state flips for the next pair, so this
                    // sample is evaluated under Ground and never appended.
                    debug!(index, speed_knots, "Takeoff detected");
                    state = FlightState::Flight;
                }
            }
        }
    }

    SegmentScan {
        candidate: CandidateFlight::from_positions(run, distance_km),
        resume_index: samples.len(),
    }
}

/// Build the derived position for one appended step.
fn derive_step(prev: &RawPosition, next: &RawPosition, speed_knots: f64) -> DerivedPosition {
    let prev_alt = prev.altitude_hundreds_ft();
    let next_alt = next.altitude_hundreds_ft();

    DerivedPosition {
        timestamp: next.time,
        latitude: next.latitude,
        longitude: next.longitude,
        groundspeed_knots: speed_knots,
        altitude_hundreds_ft: next_alt,
        heading: geo::true_heading_deg(prev.latitude, prev.longitude, next.latitude, next.longitude),
        altitude_change: AltitudeChange::between(prev_alt, next_alt),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Degrees of longitude per kilometer on the equator.
    const DEG_PER_KM: f64 = 1.0 / 111.195;

    /// Build the next equatorial sample so the pair speed is `speed_knots`.
    fn sample_after(prev: &RawPosition, speed_knots: f64, dt_secs: i64, altitude: f64) -> RawPosition {
        let dist_km = (speed_knots / geo::KM_TO_NM) * (dt_secs as f64 / 3600.0);
        RawPosition {
            time: prev.time + dt_secs,
            latitude: 0.0,
            longitude: prev.longitude + dist_km * DEG_PER_KM,
            altitude,
        }
    }

    /// Build an equatorial stream whose pairwise speeds are `speeds`.
    fn stream_with_speeds(speeds: &[f64]) -> Vec<RawPosition> {
        let mut samples = vec![RawPosition {
            time: 1_700_000_000,
            latitude: 0.0,
            longitude: 9.0,
            altitude: 300.0,
        }];
        for &speed in speeds {
            let prev = *samples.last().unwrap();
            samples.push(sample_after(&prev, speed, 60, 300.0));
        }
        samples
    }

    // ==================== no-flight streams ====================

    #[test]
    fn test_all_below_cutoff_produces_no_candidate() {
        let samples = stream_with_speeds(&[10.0, 20.0, 30.0, 15.0]);
        let scan = scan_from(&samples, 0, DEFAULT_CUTOFF_KNOTS);

        assert!(scan.candidate.is_none());
        assert_eq!(scan.resume_index, samples.len());
    }

    #[test]
    fn test_short_input_produces_no_candidate() {
        let samples = stream_with_speeds(&[]);
        let scan = scan_from(&samples, 0, DEFAULT_CUTOFF_KNOTS);

        assert!(scan.candidate.is_none());
        assert_eq!(scan.resume_index, 1);
    }

    #[test]
    fn test_single_above_cutoff_pair_only_arms_the_state() {
        // One fast pair transitions Ground -> Flight but is itself never
        // appended, so the run stays empty.
        let samples = stream_with_speeds(&[80.0, 10.0]);
        let scan = scan_from(&samples, 0, DEFAULT_CUTOFF_KNOTS);

        assert!(scan.candidate.is_none());
    }

    // ==================== full flight scenario ====================

    #[test]
    fn test_five_sample_flight_with_entry_lag_and_landing() {
        // Pairwise speeds 80, 90, 85, 20 against a 60 kn cutoff:
        // 80 arms Flight (not appended), 90 and 85 are appended, 20 is the
        // landing boundary (not appended).
        let samples = stream_with_speeds(&[80.0, 90.0, 85.0, 20.0]);
        let scan = scan_from(&samples, 0, 60.0);

        let flight = scan.candidate.expect("one candidate expected");
        assert_eq!(flight.positions.len(), 2);
        assert!((flight.positions[0].groundspeed_knots - 90.0).abs() < 1.0);
        assert!((flight.positions[1].groundspeed_knots - 85.0).abs() < 1.0);

        // Scan stops at the landing sample (index 4 of 5).
        assert_eq!(scan.resume_index, 4);
    }

    #[test]
    fn test_entry_lag_run_length_minus_one() {
        // A bounded run of N above-cutoff pairs yields N-1 positions.
        let samples = stream_with_speeds(&[5.0, 100.0, 100.0, 100.0, 100.0, 100.0, 5.0]);
        let scan = scan_from(&samples, 0, DEFAULT_CUTOFF_KNOTS);

        let flight = scan.candidate.expect("one candidate expected");
        assert_eq!(flight.positions.len(), 4);
    }

    #[test]
    fn test_stream_exhausted_while_airborne() {
        let samples = stream_with_speeds(&[90.0, 110.0, 120.0]);
        let scan = scan_from(&samples, 0, DEFAULT_CUTOFF_KNOTS);

        let flight = scan.candidate.expect("one candidate expected");
        assert_eq!(flight.positions.len(), 2);
        assert_eq!(scan.resume_index, samples.len());
    }

    // ==================== degenerate pairs ====================

    #[test]
    fn test_zero_distance_pair_is_skipped() {
        // A repeated fix mid-flight must not end the run or emit a position.
        let mut samples = stream_with_speeds(&[80.0, 100.0, 100.0]);
        let hover = *samples.last().unwrap();
        samples.push(RawPosition {
            time: hover.time + 60,
            ..hover
        });
        let tail = *samples.last().unwrap();
        samples.push(sample_after(&tail, 100.0, 60, 300.0));
        samples.push(sample_after(samples.last().unwrap(), 10.0, 60, 300.0));

        let scan = scan_from(&samples, 0, DEFAULT_CUTOFF_KNOTS);
        let flight = scan.candidate.expect("one candidate expected");

        // Appended: the two 100 kn pairs before the repeat, one after.
        assert_eq!(flight.positions.len(), 3);
    }

    #[test]
    fn test_duplicate_timestamp_pair_is_skipped() {
        let mut samples = stream_with_speeds(&[80.0, 100.0]);
        let last = *samples.last().unwrap();
        // Same time, different place: speed is undefined.
        samples.push(RawPosition {
            time: last.time,
            longitude: last.longitude + 0.01,
            ..last
        });

        let scan = scan_from(&samples, 0, DEFAULT_CUTOFF_KNOTS);
        let flight = scan.candidate.expect("one candidate expected");
        assert_eq!(flight.positions.len(), 1);
    }

    // ==================== cutoff boundary ====================

    #[test]
    fn test_takeoff_requires_speed_above_cutoff() {
        // The 59.9 kn pair must not arm the state machine; only the 100 kn
        // pair does, so exactly one position is appended before landing.
        let samples = stream_with_speeds(&[59.9, 100.0, 100.0, 20.0]);
        let scan = scan_from(&samples, 0, 60.0);

        let flight = scan.candidate.expect("one candidate expected");
        assert_eq!(flight.positions.len(), 1);
    }

    #[test]
    fn test_flight_continues_just_above_cutoff() {
        let samples = stream_with_speeds(&[80.0, 90.0, 61.0, 61.0, 20.0]);
        let scan = scan_from(&samples, 0, 60.0);

        let flight = scan.candidate.expect("one candidate expected");
        assert_eq!(flight.positions.len(), 3);
        assert_eq!(scan.resume_index, 5);
    }

    // ==================== derived fields ====================

    #[test]
    fn test_derived_positions_have_heading_and_trend() {
        let mut samples = vec![RawPosition {
            time: 1_700_000_000,
            latitude: 0.0,
            longitude: 9.0,
            altitude: 0.0,
        }];
        // Eastbound, climbing 300 m per step.
        for step in 1..=4 {
            let prev = *samples.last().unwrap();
            samples.push(sample_after(&prev, 100.0, 60, step as f64 * 300.0));
        }

        let scan = scan_from(&samples, 0, DEFAULT_CUTOFF_KNOTS);
        let flight = scan.candidate.expect("one candidate expected");

        for pos in &flight.positions {
            assert!((pos.heading - 90.0).abs() < 1.0, "eastbound heading");
            assert_eq!(pos.altitude_change, AltitudeChange::Climbing);
        }
    }

    #[test]
    fn test_cumulative_distance() {
        // Four appended steps of 100 kn over 60 s each: ~3.09 km per step.
        let samples = stream_with_speeds(&[100.0, 100.0, 100.0, 100.0, 100.0, 5.0]);
        let scan = scan_from(&samples, 0, DEFAULT_CUTOFF_KNOTS);

        let flight = scan.candidate.expect("one candidate expected");
        assert_eq!(flight.positions.len(), 4);
        let step_km = (100.0 / geo::KM_TO_NM) / 60.0;
        assert!(
            (flight.distance_km - 4.0 * step_km).abs() < 0.05,
            "expected ~{:.2} km, got {:.2}",
            4.0 * step_km,
            flight.distance_km
        );
    }

    // ==================== resume behavior ====================

    #[test]
    fn test_two_flights_in_one_stream() {
        let samples = stream_with_speeds(&[
            80.0, 100.0, 100.0, 20.0, // first flight, landing at index 4
            10.0, 90.0, 110.0, 110.0, 15.0, // second flight
        ]);

        let first = scan_from(&samples, 0, DEFAULT_CUTOFF_KNOTS);
        let flight1 = first.candidate.expect("first candidate");
        assert_eq!(flight1.positions.len(), 2);
        assert_eq!(first.resume_index, 4);

        let second = scan_from(&samples, first.resume_index, DEFAULT_CUTOFF_KNOTS);
        let flight2 = second.candidate.expect("second candidate");
        assert_eq!(flight2.positions.len(), 2);
        assert_eq!(second.resume_index, 9);
    }
}
