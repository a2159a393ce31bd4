//! Settings structs for all configuration sections.
//!
//! Each struct represents one `[section]` of the INI config file.
//! These are pure data types with no parsing or serialization logic.

use std::path::PathBuf;

/// Complete application configuration loaded from config.ini.
#[derive(Debug, Clone)]
pub struct ConfigFile {
    /// Ingestion pipeline settings
    pub ingestion: IngestionSettings,
    /// Airport directory settings
    pub airports: AirportsSettings,
    /// Logging settings
    pub logging: LoggingSettings,
}

/// Ingestion pipeline configuration.
#[derive(Debug, Clone)]
pub struct IngestionSettings {
    /// Groundspeed cutoff separating ground and flight, in knots.
    pub speed_cutoff_knots: f64,
    /// Write each submitted batch verbatim to an audit file.
    pub audit: bool,
    /// Directory for audit files.
    pub audit_directory: PathBuf,
}

/// Airport directory configuration.
#[derive(Debug, Clone)]
pub struct AirportsSettings {
    /// Path to the reference airport directory file (None = no reference
    /// pool; only previously visited airports are matched).
    pub reference_file: Option<PathBuf>,
}

/// Logging configuration.
#[derive(Debug, Clone)]
pub struct LoggingSettings {
    /// Directory for log files.
    pub directory: PathBuf,
    /// Log filename.
    pub file: String,
}

impl ConfigFile {
    /// Project the file settings onto the orchestrator's configuration.
    pub fn ingest_config(&self) -> crate::ingest::IngestConfig {
        crate::ingest::IngestConfig {
            cutoff_knots: self.ingestion.speed_cutoff_knots,
            audit: self.ingestion.audit,
            audit_dir: self.ingestion.audit_directory.clone(),
        }
    }
}
