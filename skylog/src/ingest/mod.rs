//! Ingestion orchestration.
//!
//! [`IngestService`] drives one telemetry batch end to end:
//!
//! 1. **Validate** - reject empty batches and batches of fewer than two
//!    samples before any processing.
//! 2. **Segment** - repeatedly scan the sorted stream for in-flight runs.
//! 3. **Resolve** - anchor each candidate's endpoints to the nearest
//!    known airport and ensure that airport exists in the directory.
//! 4. **Dedup or persist** - discard candidates already stored, persist
//!    the rest atomically.
//!
//! Persistence failures are per-candidate: one failed flight is logged,
//! recorded in the report, and does not abort the rest of the batch.
//! The pipeline is idempotent at the batch level; resubmitting the same
//! telemetry yields only duplicates and no new ids.
//!
//! # Components
//!
//! - [`traits`] - `AirportDirectory` / `FlightStore` collaborator seams
//! - [`dedup`] - duplicate flight detection
//! - [`report`] - `IngestReport` and the JSON response envelope
//! - [`audit`] - verbatim batch dump for offline replay
//! - [`memory`] - in-memory collaborators for tests and the CLI

pub mod audit;
pub mod dedup;
pub mod memory;
pub mod report;
pub mod traits;

use std::path::PathBuf;

use tracing::{debug, info, warn};

use crate::airport::{resolver::nearest_airport, AirportCandidate};
use crate::flight::CandidateFlight;
use crate::position::RawPosition;
use crate::segmenter::{self, DEFAULT_CUTOFF_KNOTS};

pub use memory::{MemoryAirportDirectory, MemoryFlightStore, StoredFlight};
pub use report::{CandidateFailure, IngestReport, IngestResponse};
pub use traits::{
    AirportDirectory, DirectoryError, DirectoryResult, FlightStore, StoreError, StoreResult,
    StoredFlightSummary,
};

/// Errors that abort a whole batch.
#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The submitted batch contained no samples.
    #[error("telemetry batch is empty")]
    EmptyBatch,

    /// The batch is too short to contain even one position pair.
    #[error("telemetry batch needs at least 2 samples, got {count}")]
    InsufficientSamples { count: usize },

    /// The airport pools could not be fetched.
    #[error(transparent)]
    Directory(#[from] DirectoryError),

    /// The flight store failed outside the per-candidate loop.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Errors recovered per candidate within a batch.
#[derive(Debug, thiserror::Error)]
enum CandidateError {
    #[error(transparent)]
    Directory(#[from] DirectoryError),
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Ingestion configuration, passed in explicitly so the pipeline stays
/// independently testable.
#[derive(Debug, Clone)]
pub struct IngestConfig {
    /// Groundspeed cutoff separating ground and flight, in knots.
    pub cutoff_knots: f64,
    /// Write the raw batch to an audit file before processing.
    pub audit: bool,
    /// Directory for audit files.
    pub audit_dir: PathBuf,
}

impl Default for IngestConfig {
    fn default() -> Self {
        Self {
            cutoff_knots: DEFAULT_CUTOFF_KNOTS,
            audit: false,
            audit_dir: PathBuf::from("audit"),
        }
    }
}

/// Drives the telemetry-to-logbook pipeline over submitted batches.
pub struct IngestService<D, S> {
    directory: D,
    store: S,
    config: IngestConfig,
}

impl<D: AirportDirectory, S: FlightStore> IngestService<D, S> {
    /// Create a service over the given collaborators.
    pub fn new(directory: D, store: S, config: IngestConfig) -> Self {
        Self {
            directory,
            store,
            config,
        }
    }

    /// The airport directory collaborator.
    pub fn directory(&self) -> &D {
        &self.directory
    }

    /// The flight store collaborator.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Process one telemetry batch.
    ///
    /// Samples may arrive in any order; they are sorted by time before
    /// segmentation. Returns the accumulated report, or an error when the
    /// batch as a whole could not be processed. Candidates already
    /// committed before a batch-fatal error stay committed; there is no
    /// compensating rollback.
    pub fn ingest(&self, mut samples: Vec<RawPosition>) -> Result<IngestReport, IngestError> {
        if samples.is_empty() {
            return Err(IngestError::EmptyBatch);
        }
        if samples.len() < 2 {
            return Err(IngestError::InsufficientSamples {
                count: samples.len(),
            });
        }

        if self.config.audit {
            if let Err(e) = audit::write_audit_file(&self.config.audit_dir, &samples) {
                warn!(error = %e, "Failed to write telemetry audit file");
            }
        }

        samples.sort_by_key(|sample| sample.time);

        let candidates = self.segment(&samples);
        info!(
            samples = samples.len(),
            candidates = candidates.len(),
            "Telemetry batch segmented"
        );

        let visited = self.directory.visited_airports()?;
        let reference = self.directory.reference_airports()?;

        let mut report = IngestReport::default();
        for mut candidate in candidates {
            match self.commit_candidate(&visited, &reference, &mut candidate) {
                Ok(Some(id)) => {
                    info!(
                        id = %id,
                        start = candidate.start_airport_id.as_deref().unwrap_or("?"),
                        end = candidate.end_airport_id.as_deref().unwrap_or("?"),
                        positions = candidate.positions.len(),
                        "Persisted flight"
                    );
                    report.created.push(id);
                }
                Ok(None) => {
                    debug!(
                        start_time = candidate.start_time,
                        "Candidate already stored, discarding"
                    );
                    report.duplicates += 1;
                }
                Err(e) => {
                    warn!(
                        start_time = candidate.start_time,
                        error = %e,
                        "Candidate failed, continuing batch"
                    );
                    report.failures.push(CandidateFailure {
                        start_time: candidate.start_time,
                        message: e.to_string(),
                    });
                }
            }
        }

        Ok(report)
    }

    /// Run the segmenter repeatedly until the stream is consumed.
    fn segment(&self, samples: &[RawPosition]) -> Vec<CandidateFlight> {
        let mut candidates = Vec::new();
        let mut index = 0;

        while index + 1 < samples.len() {
            let scan = segmenter::scan_from(samples, index, self.config.cutoff_knots);
            if let Some(candidate) = scan.candidate {
                candidates.push(candidate);
            }
            index = scan.resume_index;
        }

        candidates
    }

    /// Resolve, dedup, and persist one candidate.
    ///
    /// Returns the new flight id, or `None` when the candidate is a
    /// duplicate.
    fn commit_candidate(
        &self,
        visited: &[AirportCandidate],
        reference: &[AirportCandidate],
        candidate: &mut CandidateFlight,
    ) -> Result<Option<String>, CandidateError> {
        candidate.start_airport_id = self.resolve_endpoint(
            candidate.start_latitude,
            candidate.start_longitude,
            visited,
            reference,
        )?;
        candidate.end_airport_id = self.resolve_endpoint(
            candidate.end_latitude,
            candidate.end_longitude,
            visited,
            reference,
        )?;

        let stored = self.store.flights_starting_at(candidate.start_time)?;
        if dedup::is_duplicate(candidate, &stored) {
            return Ok(None);
        }

        let id = self.store.insert_flight(candidate)?;
        Ok(Some(id))
    }

    /// Match one endpoint to the nearest airport and ensure it exists.
    ///
    /// An identifier the directory declines to create is not referenced;
    /// the endpoint stays unresolved rather than failing the candidate.
    fn resolve_endpoint(
        &self,
        latitude: f64,
        longitude: f64,
        visited: &[AirportCandidate],
        reference: &[AirportCandidate],
    ) -> Result<Option<String>, CandidateError> {
        let Some(found) = nearest_airport(latitude, longitude, visited, reference) else {
            return Ok(None);
        };

        match self.directory.ensure_airport(&found.id)? {
            Some(record) => Ok(Some(record.id)),
            None => {
                warn!(id = %found.id, "Directory declined to create resolved airport");
                Ok(None)
            }
        }
    }
}
