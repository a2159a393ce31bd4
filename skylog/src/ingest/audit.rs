//! Debug audit trail for submitted telemetry.
//!
//! When the audit flag is enabled, the raw batch is written verbatim to a
//! timestamped file before processing begins, purely for offline replay
//! and debugging. Audit failures never affect the ingestion response; the
//! orchestrator logs them and moves on.

use std::fs;
use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};

use crate::position::RawPosition;

/// Errors raised while writing the audit file.
#[derive(Debug, thiserror::Error)]
pub enum AuditError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to serialize batch: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Write the raw batch to a timestamped append-only file.
///
/// Creates the audit directory if needed. The filename carries a
/// millisecond timestamp so successive submissions in the same second do
/// not collide.
///
/// # Returns
///
/// The path of the written file.
pub fn write_audit_file(audit_dir: &Path, samples: &[RawPosition]) -> Result<PathBuf, AuditError> {
    fs::create_dir_all(audit_dir)?;

    let stamp = chrono::Local::now().format("%Y%m%d-%H%M%S%.3f");
    let path = audit_dir.join(format!("telemetry-{}.json", stamp));

    let payload = serde_json::to_string_pretty(samples)?;

    let mut file = OpenOptions::new().create(true).append(true).open(&path)?;
    file.write_all(payload.as_bytes())?;
    file.write_all(b"\n")?;

    tracing::debug!(path = %path.display(), samples = samples.len(), "Wrote telemetry audit file");

    Ok(path)
}
