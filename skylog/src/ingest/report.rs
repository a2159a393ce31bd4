//! Ingestion outcome types.
//!
//! One batch produces an [`IngestReport`]: the ids of newly persisted
//! flights plus per-candidate failures, accumulated rather than thrown,
//! so callers can distinguish "some failed" from "all failed". The
//! [`IngestResponse`] envelope is the JSON shape returned to the
//! submitting device.

use serde::{Deserialize, Serialize};

use super::IngestError;

/// Accumulated outcome of one ingestion batch.
#[derive(Debug, Default)]
pub struct IngestReport {
    /// Ids of newly persisted flights, in detection order.
    pub created: Vec<String>,
    /// Number of candidates discarded as duplicates.
    pub duplicates: usize,
    /// Candidates that failed to persist; the batch continued past them.
    pub failures: Vec<CandidateFailure>,
}

impl IngestReport {
    /// True when every candidate either persisted or deduplicated cleanly.
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }
}

/// One candidate that could not be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateFailure {
    /// Start time of the failed candidate (epoch seconds).
    pub start_time: i64,
    /// Human-readable failure description.
    pub message: String,
}

/// JSON response envelope for one ingestion call.
///
/// Serializes to `{ "ok": true, "ids": [...] }` on success or
/// `{ "ok": false, "message": "..." }` on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngestResponse {
    /// Whether the batch was processed.
    pub ok: bool,
    /// Ids of newly persisted flights (present iff `ok`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ids: Option<Vec<String>>,
    /// Failure description (present iff not `ok`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl IngestResponse {
    /// Successful envelope listing newly created flight ids.
    pub fn success(ids: Vec<String>) -> Self {
        Self {
            ok: true,
            ids: Some(ids),
            message: None,
        }
    }

    /// Failure envelope with an explicit message.
    pub fn failure(message: &str) -> Self {
        Self {
            ok: false,
            ids: None,
            message: Some(message.to_string()),
        }
    }

    /// Build the envelope from an ingestion outcome.
    ///
    /// Validation failures carry their own description; anything else
    /// that aborted the batch is reported generically, since the caller
    /// cannot act on collaborator internals.
    pub fn from_result(result: Result<IngestReport, IngestError>) -> Self {
        match result {
            Ok(report) => Self::success(report.created),
            Err(e @ (IngestError::EmptyBatch | IngestError::InsufficientSamples { .. })) => {
                Self::failure(&e.to_string())
            }
            Err(_) => Self::failure("telemetry ingestion failed"),
        }
    }
}
