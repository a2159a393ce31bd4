//! Serialization of `ConfigFile` back to INI text.
//!
//! The writer emits a commented file so a fresh installation documents
//! itself; comments are not round-tripped through parsing.

use super::settings::ConfigFile;

/// Render the configuration as INI text.
pub(super) fn to_config_string(config: &ConfigFile) -> String {
    let mut out = String::new();

    out.push_str("# skylog configuration\n");
    out.push_str("#\n");
    out.push_str("# Values removed from this file fall back to their defaults.\n\n");

    out.push_str("[ingestion]\n");
    out.push_str("# Groundspeed separating ground and flight, in knots.\n");
    out.push_str(&format!(
        "speed_cutoff_knots = {}\n",
        config.ingestion.speed_cutoff_knots
    ));
    out.push_str("# Write each submitted batch verbatim to an audit file.\n");
    out.push_str(&format!("audit = {}\n", config.ingestion.audit));
    out.push_str(&format!(
        "audit_directory = {}\n\n",
        config.ingestion.audit_directory.display()
    ));

    out.push_str("[airports]\n");
    out.push_str("# Reference airport directory file (id latitude longitude name).\n");
    match &config.airports.reference_file {
        Some(path) => out.push_str(&format!("reference_file = {}\n\n", path.display())),
        None => out.push_str("# reference_file =\n\n"),
    }

    out.push_str("[logging]\n");
    out.push_str(&format!(
        "directory = {}\n",
        config.logging.directory.display()
    ));
    out.push_str(&format!("file = {}\n", config.logging.file));

    out
}
