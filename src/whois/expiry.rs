//! Expiry field extraction from raw WHOIS output.
//!
//! WHOIS output is free text and registries disagree on field names and date
//! formats. The extractor scans trimmed lines for the first one labeled as an
//! expiry/expiration date and parses its value with a flexible format table.
//! Absence of the field and an unparseable value are deliberately different
//! results: the caller must not conflate "no data" with "bad data".

use anyhow::{anyhow, Result};
use chrono::{DateTime, Utc};
use regex::Regex;

use super::types::Expiry;

/// Matches e.g. "Registry Expiry Date: 2025-01-01T00:00:00Z" or
/// "Expiration Time: 2025-01-01 00:00:00"; the value is everything after the
/// colon.
const EXPIRY_PATTERN: &str = r"(?i)(expiry|expiration)\s(date|time):\s*(\S.*)";

/// Extracts expiry timestamps from raw WHOIS output.
///
/// The pattern is compiled once at construction and the extractor is passed
/// wherever it is needed; there is no process-wide regex state.
#[derive(Debug)]
pub struct ExpiryExtractor {
    pattern: Regex,
}

impl ExpiryExtractor {
    /// Builds the extractor.
    pub fn new() -> Self {
        // The pattern is a compile-time literal; construction cannot fail
        Self {
            pattern: Regex::new(EXPIRY_PATTERN).unwrap(),
        }
    }

    /// Scans raw WHOIS output for the first labeled expiry field.
    ///
    /// Lines are trimmed and scanned in order; the first matching line is
    /// authoritative and scanning stops there, since registries often list
    /// several date-like fields.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(expiry))` when a field was found and its value parsed
    /// - `Ok(None)` when no line carried an expiry field
    ///
    /// # Errors
    ///
    /// Returns an error when a field was found but its value would not parse
    /// as a date.
    pub fn extract(&self, raw_output: &str) -> Result<Option<Expiry>> {
        for line in raw_output.lines() {
            let line = line.trim();
            if let Some(captures) = self.pattern.captures(line) {
                let value = captures
                    .get(3)
                    .map(|m| m.as_str().trim())
                    .unwrap_or_default();
                let expires_at = parse_date_string(value)
                    .ok_or_else(|| anyhow!("unparseable expiry date '{value}'"))?;
                return Ok(Some(Expiry {
                    expires_at,
                    expires_raw: value.to_string(),
                }));
            }
        }
        Ok(None)
    }
}

impl Default for ExpiryExtractor {
    fn default() -> Self {
        Self::new()
    }
}

/// Attempts to parse a date string in various formats
pub(crate) fn parse_date_string(date_str: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(date_str) {
        return Some(dt.with_timezone(&Utc));
    }

    // Try common WHOIS date formats
    let formats = [
        "%Y-%m-%dT%H:%M:%S%.fZ",
        "%Y-%m-%dT%H:%M:%SZ",
        "%Y-%m-%d %H:%M:%S",
        "%Y-%m-%d",
        "%d-%b-%Y",
        "%d/%m/%Y",
        "%Y.%m.%d %H:%M:%S",
        "%Y.%m.%d",
    ];

    for format in &formats {
        if let Ok(dt) = DateTime::parse_from_str(date_str, format) {
            return Some(dt.with_timezone(&Utc));
        }
        if let Ok(naive_dt) = chrono::NaiveDateTime::parse_from_str(date_str, format) {
            return Some(naive_dt.and_utc());
        }
        if let Ok(naive_date) = chrono::NaiveDate::parse_from_str(date_str, format) {
            return Some(naive_date.and_hms_opt(0, 0, 0)?.and_utc());
        }
    }

    None
}
