//! Parser for the reference airport directory file.
//!
//! The reference directory is a line-based text format:
//!
//! ```text
//! # id  latitude  longitude  name (optional)
//! EDDH  53.630278  9.988333   Hamburg
//! LFBO  43.629444  1.363889   Toulouse-Blagnac
//! ```
//!
//! Fields are whitespace-separated; everything after the third field is
//! the airport name. Blank lines and `#` comments are ignored. Records
//! with out-of-range coordinates are malformed.

use std::io::{BufRead, BufReader, Read};

use super::AirportRecord;

/// Error type for airport file parsing.
#[derive(Debug, thiserror::Error)]
pub enum AirportFileError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid airport record at line {line}: {message}")]
    InvalidRecord { line: usize, message: String },
}

/// Parser for the line-based airport directory format.
pub struct AirportFileParser;

impl AirportFileParser {
    /// Parse airport records from a reader.
    ///
    /// This is a streaming parser that yields records as they are parsed.
    pub fn parse<R: Read>(reader: R) -> impl Iterator<Item = Result<AirportRecord, AirportFileError>> {
        AirportFileIterator {
            reader: BufReader::new(reader),
            line_buffer: String::new(),
            line_number: 0,
        }
    }

    /// Parse all records into a vector.
    ///
    /// Skips records that fail to parse and logs warnings, so one bad
    /// line does not lose the rest of the directory.
    pub fn parse_all<R: Read>(reader: R) -> Result<Vec<AirportRecord>, AirportFileError> {
        let mut records = Vec::new();
        for result in Self::parse(reader) {
            match result {
                Ok(record) => records.push(record),
                Err(AirportFileError::InvalidRecord { line, message }) => {
                    tracing::warn!(line, %message, "Skipping malformed airport record");
                }
                Err(e) => return Err(e),
            }
        }
        Ok(records)
    }
}

/// Iterator that yields airport records from the directory file.
struct AirportFileIterator<R: BufRead> {
    reader: R,
    line_buffer: String,
    line_number: usize,
}

impl<R: BufRead> AirportFileIterator<R> {
    fn parse_record(&self, line: &str) -> Result<AirportRecord, AirportFileError> {
        let invalid = |message: &str| AirportFileError::InvalidRecord {
            line: self.line_number,
            message: message.to_string(),
        };

        let mut parts = line.split_whitespace();
        let id = parts.next().ok_or_else(|| invalid("missing identifier"))?;
        let latitude: f64 = parts
            .next()
            .ok_or_else(|| invalid("missing latitude"))?
            .parse()
            .map_err(|_| invalid("latitude is not a number"))?;
        let longitude: f64 = parts
            .next()
            .ok_or_else(|| invalid("missing longitude"))?
            .parse()
            .map_err(|_| invalid("longitude is not a number"))?;

        if !(-90.0..=90.0).contains(&latitude) {
            return Err(invalid("latitude out of range"));
        }
        if !(-180.0..=180.0).contains(&longitude) {
            return Err(invalid("longitude out of range"));
        }

        let name: Vec<&str> = parts.collect();
        let name = if name.is_empty() {
            None
        } else {
            Some(name.join(" "))
        };

        Ok(AirportRecord::new(
            id,
            name.as_deref(),
            latitude,
            longitude,
        ))
    }
}

impl<R: BufRead> Iterator for AirportFileIterator<R> {
    type Item = Result<AirportRecord, AirportFileError>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            self.line_buffer.clear();
            match self.reader.read_line(&mut self.line_buffer) {
                Ok(0) => return None,
                Ok(_) => {
                    self.line_number += 1;
                    let line = self.line_buffer.trim().to_string();

                    if line.is_empty() || line.starts_with('#') {
                        continue;
                    }

                    return Some(self.parse_record(&line));
                }
                Err(e) => return Some(Err(AirportFileError::Io(e))),
            }
        }
    }
}
