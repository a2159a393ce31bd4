//! Default values and constants for all configuration settings.

use std::path::PathBuf;

use super::settings::*;
use crate::segmenter::DEFAULT_CUTOFF_KNOTS;

/// Default audit directory, relative to the working directory.
pub const DEFAULT_AUDIT_DIRECTORY: &str = "audit";

/// Default log directory, relative to the working directory.
pub const DEFAULT_LOG_DIRECTORY: &str = "logs";

/// Default log filename.
pub const DEFAULT_LOG_FILE: &str = "skylog.log";

impl Default for ConfigFile {
    fn default() -> Self {
        Self {
            ingestion: IngestionSettings {
                speed_cutoff_knots: DEFAULT_CUTOFF_KNOTS,
                audit: false,
                audit_directory: PathBuf::from(DEFAULT_AUDIT_DIRECTORY),
            },
            airports: AirportsSettings {
                reference_file: None,
            },
            logging: LoggingSettings {
                directory: PathBuf::from(DEFAULT_LOG_DIRECTORY),
                file: DEFAULT_LOG_FILE.to_string(),
            },
        }
    }
}
