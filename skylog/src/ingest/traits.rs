//! Trait definitions for the pipeline's collaborators.
//!
//! The airport directory and flight store live outside this crate (in the
//! surrounding logbook application); these traits enable dependency
//! injection and testing of the ingestion pipeline without a real
//! database. Implementations must be usable from a multi-threaded host,
//! hence `Send + Sync`; the pipeline itself calls them sequentially.

use crate::airport::{AirportCandidate, AirportRecord};
use crate::flight::CandidateFlight;

/// Result alias for airport directory operations.
pub type DirectoryResult<T> = Result<T, DirectoryError>;

/// Result alias for flight store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors raised by an airport directory implementation.
#[derive(Debug, thiserror::Error)]
pub enum DirectoryError {
    /// The backing directory could not be reached.
    #[error("Airport directory unavailable: {0}")]
    Unavailable(String),

    /// A record could not be created for a resolved identifier.
    #[error("Failed to create airport '{id}': {reason}")]
    CreateFailed { id: String, reason: String },
}

/// Errors raised by a flight store implementation.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backing store could not be reached.
    #[error("Flight store unavailable: {0}")]
    Unavailable(String),

    /// The write violated a store constraint.
    #[error("Flight store constraint violation: {0}")]
    Constraint(String),
}

/// Summary of an already-stored flight, for duplicate detection.
///
/// The store reports these for flights whose start time exactly matches a
/// candidate's; the deduplication filter compares the remaining fields.
#[derive(Debug, Clone, PartialEq)]
pub struct StoredFlightSummary {
    /// Store-assigned flight id.
    pub id: String,
    /// Resolved departure airport of the stored flight.
    pub start_airport_id: Option<String>,
    /// Resolved arrival airport of the stored flight.
    pub end_airport_id: Option<String>,
    /// Number of derived position rows stored with the flight.
    pub position_count: usize,
}

/// Directory of known airports.
///
/// Exposes the two candidate pools searched during endpoint resolution
/// and resolves/creates authoritative records by identifier.
pub trait AirportDirectory: Send + Sync {
    /// Airports previously visited by this logbook (pool A).
    fn visited_airports(&self) -> DirectoryResult<Vec<AirportCandidate>>;

    /// The larger reference directory (pool B).
    fn reference_airports(&self) -> DirectoryResult<Vec<AirportCandidate>>;

    /// Resolve an airport record by identifier, creating it in the
    /// authoritative directory if needed.
    ///
    /// Returns `None` when the identifier is unknown and cannot be
    /// created; callers must not reference such an id in a persisted
    /// flight.
    fn ensure_airport(&self, id: &str) -> DirectoryResult<Option<AirportRecord>>;
}

/// Persistent storage for flight records.
pub trait FlightStore: Send + Sync {
    /// Summaries of stored flights whose start time equals `start_time`.
    fn flights_starting_at(&self, start_time: i64) -> StoreResult<Vec<StoredFlightSummary>>;

    /// Persist a flight's metadata and all of its derived position rows
    /// as one atomic unit.
    ///
    /// Returns the store-assigned id of the new flight. Partial writes
    /// are not permitted: on error, nothing of the flight is stored.
    fn insert_flight(&self, flight: &CandidateFlight) -> StoreResult<String>;
}
