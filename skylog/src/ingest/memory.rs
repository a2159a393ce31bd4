//! In-memory collaborator implementations.
//!
//! These back the CLI and the test suite. The directory models the two
//! pools the resolver searches: records already in the logbook (visited)
//! and a read-only reference directory loaded from a file or fixture.
//! `ensure_airport` promotes a reference record into the authoritative
//! set the first time a flight references it.

use std::collections::HashMap;
use std::sync::Mutex;

use crate::airport::{AirportCandidate, AirportRecord};
use crate::flight::CandidateFlight;

use super::traits::{
    AirportDirectory, DirectoryError, DirectoryResult, FlightStore, StoreError, StoreResult,
    StoredFlightSummary,
};

/// In-memory airport directory.
pub struct MemoryAirportDirectory {
    inner: Mutex<DirectoryInner>,
}

struct DirectoryInner {
    /// Authoritative records, keyed by uppercase identifier.
    records: HashMap<String, AirportRecord>,
    /// Read-only reference directory.
    reference: Vec<AirportRecord>,
}

impl MemoryAirportDirectory {
    /// Create a directory over a reference record set.
    pub fn new(reference: Vec<AirportRecord>) -> Self {
        Self {
            inner: Mutex::new(DirectoryInner {
                records: HashMap::new(),
                reference,
            }),
        }
    }

    /// Create a directory that already knows some visited airports.
    pub fn with_visited(reference: Vec<AirportRecord>, visited: Vec<AirportRecord>) -> Self {
        let records = visited
            .into_iter()
            .map(|record| (record.id.to_uppercase(), record))
            .collect();
        Self {
            inner: Mutex::new(DirectoryInner { records, reference }),
        }
    }

    /// Number of authoritative records currently held.
    pub fn record_count(&self) -> usize {
        self.inner.lock().map(|inner| inner.records.len()).unwrap_or(0)
    }

    fn lock(&self) -> DirectoryResult<std::sync::MutexGuard<'_, DirectoryInner>> {
        self.inner
            .lock()
            .map_err(|_| DirectoryError::Unavailable("directory lock poisoned".to_string()))
    }
}

impl AirportDirectory for MemoryAirportDirectory {
    fn visited_airports(&self) -> DirectoryResult<Vec<AirportCandidate>> {
        let inner = self.lock()?;
        Ok(inner.records.values().map(AirportRecord::as_candidate).collect())
    }

    fn reference_airports(&self) -> DirectoryResult<Vec<AirportCandidate>> {
        let inner = self.lock()?;
        Ok(inner.reference.iter().map(AirportRecord::as_candidate).collect())
    }

    fn ensure_airport(&self, id: &str) -> DirectoryResult<Option<AirportRecord>> {
        let mut inner = self.lock()?;
        let key = id.to_uppercase();

        if let Some(record) = inner.records.get(&key) {
            return Ok(Some(record.clone()));
        }

        // Promote a reference record into the authoritative set.
        let Some(record) = inner
            .reference
            .iter()
            .find(|record| record.id.eq_ignore_ascii_case(id))
            .cloned()
        else {
            return Ok(None);
        };

        inner.records.insert(key, record.clone());
        Ok(Some(record))
    }
}

/// In-memory flight store.
///
/// Insertion is a single push under one lock, which gives the atomic
/// flight-plus-positions write the trait requires.
#[derive(Default)]
pub struct MemoryFlightStore {
    inner: Mutex<StoreInner>,
}

#[derive(Default)]
struct StoreInner {
    flights: Vec<StoredFlight>,
    next_id: u64,
}

/// One stored flight with its store-assigned id.
#[derive(Debug, Clone)]
pub struct StoredFlight {
    /// Store-assigned flight id.
    pub id: String,
    /// The persisted flight record.
    pub flight: CandidateFlight,
}

impl MemoryFlightStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored flights.
    pub fn flight_count(&self) -> usize {
        self.inner.lock().map(|inner| inner.flights.len()).unwrap_or(0)
    }

    /// Snapshot of all stored flights.
    pub fn flights(&self) -> Vec<StoredFlight> {
        self.inner
            .lock()
            .map(|inner| inner.flights.clone())
            .unwrap_or_default()
    }

    fn lock(&self) -> StoreResult<std::sync::MutexGuard<'_, StoreInner>> {
        self.inner
            .lock()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }
}

impl FlightStore for MemoryFlightStore {
    fn flights_starting_at(&self, start_time: i64) -> StoreResult<Vec<StoredFlightSummary>> {
        let inner = self.lock()?;
        Ok(inner
            .flights
            .iter()
            .filter(|stored| stored.flight.start_time == start_time)
            .map(|stored| StoredFlightSummary {
                id: stored.id.clone(),
                start_airport_id: stored.flight.start_airport_id.clone(),
                end_airport_id: stored.flight.end_airport_id.clone(),
                position_count: stored.flight.positions.len(),
            })
            .collect())
    }

    fn insert_flight(&self, flight: &CandidateFlight) -> StoreResult<String> {
        let mut inner = self.lock()?;
        inner.next_id += 1;
        let id = format!("flight-{:04}", inner.next_id);
        inner.flights.push(StoredFlight {
            id: id.clone(),
            flight: flight.clone(),
        });
        Ok(id)
    }
}
