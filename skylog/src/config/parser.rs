//! INI parsing logic for converting `Ini` → `ConfigFile`.
//!
//! This is the single place where INI key names are mapped to struct
//! fields. Parsing starts from `ConfigFile::default()` and overlays any
//! values found in the INI, so a partial file is always valid.

use ini::Ini;
use std::path::PathBuf;

use super::file::ConfigFileError;
use super::settings::ConfigFile;

/// Parse an `Ini` object into a `ConfigFile`.
pub(super) fn parse_ini(ini: &Ini) -> Result<ConfigFile, ConfigFileError> {
    let mut config = ConfigFile::default();

    // [ingestion] section
    if let Some(section) = ini.section(Some("ingestion")) {
        if let Some(v) = section.get("speed_cutoff_knots") {
            let cutoff: f64 = v.parse().map_err(|_| ConfigFileError::InvalidValue {
                section: "ingestion".to_string(),
                key: "speed_cutoff_knots".to_string(),
                value: v.to_string(),
                reason: "expected a number of knots, like '60'".to_string(),
            })?;
            if cutoff <= 0.0 || !cutoff.is_finite() {
                return Err(ConfigFileError::InvalidValue {
                    section: "ingestion".to_string(),
                    key: "speed_cutoff_knots".to_string(),
                    value: v.to_string(),
                    reason: "cutoff must be a positive number".to_string(),
                });
            }
            config.ingestion.speed_cutoff_knots = cutoff;
        }
        if let Some(v) = section.get("audit") {
            config.ingestion.audit = parse_bool(v).ok_or_else(|| ConfigFileError::InvalidValue {
                section: "ingestion".to_string(),
                key: "audit".to_string(),
                value: v.to_string(),
                reason: "expected 'true' or 'false'".to_string(),
            })?;
        }
        if let Some(v) = section.get("audit_directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.ingestion.audit_directory = expand_tilde(v);
            }
        }
    }

    // [airports] section
    if let Some(section) = ini.section(Some("airports")) {
        if let Some(v) = section.get("reference_file") {
            let v = v.trim();
            if !v.is_empty() {
                config.airports.reference_file = Some(expand_tilde(v));
            }
        }
    }

    // [logging] section
    if let Some(section) = ini.section(Some("logging")) {
        if let Some(v) = section.get("directory") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.directory = expand_tilde(v);
            }
        }
        if let Some(v) = section.get("file") {
            let v = v.trim();
            if !v.is_empty() {
                config.logging.file = v.to_string();
            }
        }
    }

    Ok(config)
}

/// Parse a boolean configuration value.
fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}

/// Expand a leading `~` to the user's home directory.
fn expand_tilde(path: &str) -> PathBuf {
    if let Some(stripped) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(stripped);
        }
    }
    PathBuf::from(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn load(content: &str) -> Result<ConfigFile, ConfigFileError> {
        let ini = Ini::load_from_str(content).unwrap();
        parse_ini(&ini)
    }

    #[test]
    fn test_empty_ini_yields_defaults() {
        let config = load("").unwrap();
        assert!((config.ingestion.speed_cutoff_knots - 60.0).abs() < 1e-9);
        assert!(!config.ingestion.audit);
    }

    #[test]
    fn test_parse_ingestion_section() {
        let config = load(
            "[ingestion]\nspeed_cutoff_knots = 45.5\naudit = true\naudit_directory = /tmp/audit\n",
        )
        .unwrap();

        assert!((config.ingestion.speed_cutoff_knots - 45.5).abs() < 1e-9);
        assert!(config.ingestion.audit);
        assert_eq!(config.ingestion.audit_directory, PathBuf::from("/tmp/audit"));
    }

    #[test]
    fn test_parse_airports_section() {
        let config = load("[airports]\nreference_file = /data/airports.dat\n").unwrap();
        assert_eq!(
            config.airports.reference_file,
            Some(PathBuf::from("/data/airports.dat"))
        );
    }

    #[test]
    fn test_parse_logging_section() {
        let config = load("[logging]\ndirectory = /var/log/skylog\nfile = pipeline.log\n").unwrap();
        assert_eq!(config.logging.directory, PathBuf::from("/var/log/skylog"));
        assert_eq!(config.logging.file, "pipeline.log");
    }

    #[test]
    fn test_invalid_cutoff_is_rejected() {
        let result = load("[ingestion]\nspeed_cutoff_knots = fast\n");
        assert!(matches!(
            result,
            Err(ConfigFileError::InvalidValue { ref key, .. }) if key == "speed_cutoff_knots"
        ));

        let result = load("[ingestion]\nspeed_cutoff_knots = -5\n");
        assert!(matches!(result, Err(ConfigFileError::InvalidValue { .. })));

        let result = load("[ingestion]\nspeed_cutoff_knots = 0\n");
        assert!(matches!(result, Err(ConfigFileError::InvalidValue { .. })));
    }

    #[test]
    fn test_invalid_audit_flag_is_rejected() {
        let result = load("[ingestion]\naudit = maybe\n");
        assert!(matches!(
            result,
            Err(ConfigFileError::InvalidValue { ref key, .. }) if key == "audit"
        ));
    }

    #[test]
    fn test_parse_bool_variants() {
        assert_eq!(parse_bool("true"), Some(true));
        assert_eq!(parse_bool("YES"), Some(true));
        assert_eq!(parse_bool("1"), Some(true));
        assert_eq!(parse_bool("false"), Some(false));
        assert_eq!(parse_bool("No"), Some(false));
        assert_eq!(parse_bool("0"), Some(false));
        assert_eq!(parse_bool("maybe"), None);
    }

    #[test]
    fn test_blank_values_keep_defaults() {
        let config = load("[ingestion]\naudit_directory =\n[airports]\nreference_file =\n").unwrap();
        assert_eq!(config.ingestion.audit_directory, PathBuf::from("audit"));
        assert!(config.airports.reference_file.is_none());
    }
}
